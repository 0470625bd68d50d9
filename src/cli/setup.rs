//! Setup command.
//!
//! Registers a key pair and storage file for a profile and creates the
//! empty encrypted store.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{output, prompt, Context};
use crate::core::cipher::{Age, Cipher};
use crate::core::config::{Profile, Profiles};
use crate::core::constants::DEFAULT_PROFILE;
use crate::core::domain::{Identity, Recipient};
use crate::core::store::SecretStore;
use crate::error::{CipherError, Result};

const KEY_CHECK: &str = "crumb-key-check";

/// Configure the current profile.
pub fn execute(ctx: &Context) -> Result<()> {
    let profile_name = ctx.profile.as_str();
    let (default_public, default_private) = default_key_paths(profile_name);

    let public_key_path = ask_path(ctx, "Path to public key", &default_public)?;
    let private_key_path = ask_path(ctx, "Path to private key", &default_private)?;

    let recipient = check_key_pair(&public_key_path, &private_key_path)?;

    let storage = match ctx.storage.as_deref().filter(|s| !s.is_empty()) {
        Some(flag) => ctx.dir.expand(flag),
        None if profile_name == DEFAULT_PROFILE => ctx.dir.default_storage(),
        None => {
            let suggested = ctx.dir.suggested_storage(profile_name);
            let answer = prompt::input(&format!(
                "Storage file path (e.g., {})",
                suggested.display()
            ))?;
            if answer.is_empty() {
                suggested
            } else {
                ctx.dir.expand(&answer)
            }
        }
    };

    let mut profiles = Profiles::load_or_default(&ctx.dir)?;
    profiles.insert(
        profile_name,
        Profile {
            public_key_path,
            private_key_path,
            storage: Some(storage.clone()),
        },
    );
    profiles.save(&ctx.dir)?;

    let store = SecretStore::new(&storage);
    if store.exists() {
        output::warn(&format!(
            "keeping existing storage file {}",
            storage.display()
        ));
    } else {
        store.create_empty(&recipient)?;
    }

    output::success(&format!("profile '{}' is ready", profile_name));
    output::kv("config ", output::path(ctx.dir.profiles_path().display()));
    output::kv("storage", output::path(storage.display()));
    Ok(())
}

fn default_key_paths(profile: &str) -> (String, String) {
    let name = if profile == DEFAULT_PROFILE {
        "id_ed25519"
    } else {
        profile
    };
    (format!("~/.ssh/{}.pub", name), format!("~/.ssh/{}", name))
}

/// Prompt for a key path; an empty answer takes the default.
fn ask_path(ctx: &Context, label: &str, default: &str) -> Result<PathBuf> {
    let answer = prompt::input(&format!("{} (e.g., {})", label, default))?;
    let answer = if answer.is_empty() { default } else { &answer };
    Ok(ctx.dir.expand(answer))
}

/// Load both halves and prove the private key opens what the public key seals.
fn check_key_pair(public: &Path, private: &Path) -> Result<Recipient> {
    let recipient = Recipient::load(public)?;
    let identity = Identity::load(private)?;

    let sealed = Age.encrypt(KEY_CHECK, &[&recipient])?;
    match Age.decrypt(&sealed, &identity) {
        Ok(opened) if opened.as_str() == KEY_CHECK => {
            debug!(public = %public.display(), "key pair verified");
            Ok(recipient)
        }
        _ => Err(CipherError::InvalidIdentity(format!(
            "{} does not match {}",
            private.display(),
            public.display()
        ))
        .into()),
    }
}
