//! Init command.
//!
//! Writes a default `.crumb.yaml` in the current directory.

use std::path::Path;

use crate::cli::{output, prompt};
use crate::core::config::ProjectConfig;
use crate::core::constants::PROJECT_FILE;
use crate::error::{Error, Result};

/// Create the project export config.
pub fn execute(force: bool) -> Result<()> {
    let path = Path::new(PROJECT_FILE);

    if path.exists()
        && !force
        && !prompt::confirm(&format!("Config file {} already exists. Overwrite?", PROJECT_FILE))?
    {
        return Err(Error::Cancelled);
    }

    ProjectConfig::default_config().save(path)?;

    output::success(&format!("created {}", output::path(PROJECT_FILE)));
    output::hint("add secret paths under environments.default, then run: crumb export");
    Ok(())
}
