//! Storage commands - choose the storage file per profile.

use crate::cli::{output, Context};
use crate::core::config::Profiles;
use crate::error::{ConfigError, Result};

/// Point the current profile at a custom storage file.
pub fn set(ctx: &Context, path: &str) -> Result<()> {
    let mut profiles = Profiles::load(&ctx.dir)?;
    let storage = ctx.dir.expand(path);

    profiles.set_storage(&ctx.profile, storage.clone())?;
    profiles.save(&ctx.dir)?;

    output::success(&format!(
        "storage set to {} (profile: {})",
        output::path(storage.display()),
        ctx.profile
    ));
    Ok(())
}

/// Show the storage file the current profile resolves to.
pub fn get(ctx: &Context) -> Result<()> {
    let profiles = Profiles::load(&ctx.dir)?;
    let profile = profiles.get(&ctx.profile)?;
    let storage = ctx.dir.storage_path(ctx.storage.as_deref(), profile);

    println!("Storage: {} (profile: {})", storage.display(), ctx.profile);
    Ok(())
}

/// Drop the custom storage file so the default is used again.
pub fn clear(ctx: &Context) -> Result<()> {
    let mut profiles = Profiles::load(&ctx.dir)?;
    if !profiles.clear_storage(&ctx.profile) {
        return Err(ConfigError::ProfileNotFound(ctx.profile.clone()).into());
    }
    profiles.save(&ctx.dir)?;

    output::success(&format!(
        "storage cleared for profile {} (using default)",
        ctx.profile
    ));
    Ok(())
}
