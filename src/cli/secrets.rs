//! Secret management commands (ls, set, get, delete, move).

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::{self, TerminalConfirm};
use crate::cli::{Context, Session};
use crate::core::export::final_segment_name;
use crate::core::path::filtered_sorted_keys;
use crate::core::validation::{validate_path, validate_value};
use crate::error::{Error, Result};

/// List secret paths under an optional prefix.
pub fn ls(ctx: &Context, filter: Option<&str>) -> Result<()> {
    let session = Session::open(ctx)?;
    let secrets = session.load()?;

    let keys = filtered_sorted_keys(&secrets, filter.unwrap_or(""));
    if keys.is_empty() {
        output::dimmed("no secrets found");
        return Ok(());
    }

    // One path per line for scripting
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}

/// Set a secret, asking before overwriting an existing one.
pub fn set(ctx: &Context, path: &str, value: &str) -> Result<()> {
    validate_path(path)?;
    validate_value(path, value)?;
    info!(path, "setting secret");

    let session = Session::open(ctx)?;
    let mut secrets = session.load()?;

    if secrets.exists(path).is_some()
        && !prompt::confirm(&format!("Key '{}' already exists. Overwrite?", path))?
    {
        return Err(Error::Cancelled);
    }

    secrets.set(path, value);
    session.save(&secrets)?;

    output::success(&format!("set {}", output::key(path)));
    Ok(())
}

/// Show a secret: masked, in clear text, or as a shell assignment.
pub fn get(
    ctx: &Context,
    path: &str,
    show: bool,
    export: bool,
    shell: Option<&str>,
) -> Result<()> {
    validate_path(path)?;

    // Fail on a bad --shell before touching the store.
    let shell = if export { Some(ctx.shell(shell)?) } else { None };

    let session = Session::open(ctx)?;
    let secrets = session.load()?;
    let value = secrets.get(path)?;

    match shell {
        Some(shell) => println!("{}", shell.assignment(&final_segment_name(path), value)),
        None if show => println!("{}", value),
        None => println!("****"),
    }
    Ok(())
}

/// Delete a secret once the user retypes its path.
pub fn delete(ctx: &Context, path: &str) -> Result<()> {
    validate_path(path)?;

    let session = Session::open(ctx)?;
    let mut secrets = session.load()?;
    secrets.get(path)?;

    let typed = prompt::input("Type the key path to confirm deletion")?;
    if typed != path {
        return Err(Error::Cancelled);
    }

    info!(path, "deleting secret");
    secrets.delete(path);
    session.save(&secrets)?;

    output::success(&format!("deleted {}", output::key(path)));
    Ok(())
}

/// Move a secret, asking before replacing an existing target.
pub fn move_secret(ctx: &Context, old: &str, new: &str) -> Result<()> {
    validate_path(old)?;
    validate_path(new)?;

    let session = Session::open(ctx)?;
    let mut secrets = session.load()?;

    let confirm = TerminalConfirm::default();
    let moved = secrets.move_to(old, new, &confirm);
    confirm.finish(moved)?;
    session.save(&secrets)?;

    output::success(&format!(
        "moved {} to {}",
        output::key(old),
        output::key(new)
    ));
    Ok(())
}
