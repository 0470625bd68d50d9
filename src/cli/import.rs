//! Import command - load a .env file under a base path.

use std::path::Path;

use tracing::info;

use crate::cli::{output, prompt, Context, Session};
use crate::core::env::DotEnv;
use crate::core::validation::{validate_path, validate_value};
use crate::error::{Error, Result};

/// Import every variable of `file` as `<base>/<NAME>`.
///
/// Existing paths are listed and only overwritten after confirmation.
/// Variables that would make an invalid path or value are skipped.
pub fn execute(ctx: &Context, file: &Path, base: &str) -> Result<()> {
    validate_path(base)?;

    let dotenv = DotEnv::load(file)?;
    if dotenv.is_empty() {
        output::dimmed(&format!("no variables found in {}", file.display()));
        return Ok(());
    }

    let session = Session::open(ctx)?;
    let mut secrets = session.load()?;

    let base = base.strip_suffix('/').unwrap_or(base);
    let mut incoming = Vec::with_capacity(dotenv.len());
    let mut conflicts = Vec::new();

    for (name, value) in dotenv.iter() {
        let path = format!("{}/{}", base, name);
        if let Err(e) = validate_path(&path).and_then(|()| validate_value(&path, value)) {
            output::warn(&format!("skipping {}: {}", name, e));
            continue;
        }
        if secrets.exists(&path).is_some() {
            conflicts.push(path.clone());
        }
        incoming.push((path, value));
    }

    println!(
        "Found {} variables in {}",
        dotenv.len(),
        output::path(file.display())
    );
    let new = incoming.len() - conflicts.len();
    if new > 0 {
        output::kv("new", new);
    }
    if !conflicts.is_empty() {
        output::kv("overwrite", conflicts.len());
        for path in &conflicts {
            output::list_item(path);
        }
        if !prompt::confirm("Continue with import? This will overwrite existing keys.")? {
            return Err(Error::Cancelled);
        }
    }

    let count = incoming.len();
    for (path, value) in incoming {
        secrets.set(path, value);
    }
    session.save(&secrets)?;

    info!(count, base, "imported secrets");
    output::success(&format!(
        "imported {} secrets from {} to {}",
        count,
        output::path(file.display()),
        output::key(base)
    ));
    Ok(())
}
