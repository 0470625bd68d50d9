//! Export command.
//!
//! Prints shell assignments, either for an environment in `.crumb.yaml` or
//! for every secret under `--path`. Output is meant for `eval`.

use std::path::Path;

use crate::cli::{Context, Session};
use crate::core::config::ProjectConfig;
use crate::core::env::Shell;
use crate::core::export::{self, Exports};
use crate::error::Result;

/// Resolve and print the assignments.
pub fn execute(
    ctx: &Context,
    shell: Option<&str>,
    file: &Path,
    env: &str,
    prefix: Option<&str>,
) -> Result<()> {
    let shell = ctx.shell(shell)?;

    let session = Session::open(ctx)?;
    let secrets = session.load()?;

    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => {
            let exports = export::export_path(&secrets, prefix)?;
            let source = prefix.strip_suffix('/').unwrap_or(prefix);
            print(shell, Some(source), &exports);
        }
        None => {
            let config = ProjectConfig::load(file)?;
            let environment = config.environment(env)?;
            let exports = export::resolve(environment, &secrets)?;
            let source = (!environment.path.is_empty()).then_some(environment.path.as_str());
            print(shell, source, &exports);
        }
    }
    Ok(())
}

fn print(shell: Shell, source: Option<&str>, exports: &Exports) {
    if let Some(source) = source {
        println!("# Exported from {}", source);
    }
    for (name, value) in exports.iter() {
        println!("{}", shell.assignment(name, value));
    }
}
