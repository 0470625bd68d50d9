//! Per-invocation context shared by commands.
//!
//! [`Context`] carries the global flags and the resolved config directory.
//! [`Session`] adds the selected profile and its storage, and runs the
//! load/save half of every load, mutate, save cycle.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::{ConfigDir, Profile, Profiles, Settings};
use crate::core::domain::{Identity, Recipient, SecretSet};
use crate::core::env::Shell;
use crate::core::store::SecretStore;
use crate::core::types::ProfileName;
use crate::error::Result;

/// Global flags plus the config directory.
#[derive(Debug, Clone)]
pub struct Context {
    pub dir: ConfigDir,
    pub profile: ProfileName,
    pub storage: Option<String>,
}

impl Context {
    /// Output shell: the flag, then `crumb.toml`, then bash.
    pub fn shell(&self, flag: Option<&str>) -> Result<Shell> {
        if let Some(flag) = flag {
            return flag.parse();
        }
        match Settings::load(&self.dir)?.shell {
            Some(shell) => shell.parse(),
            None => Ok(Shell::default()),
        }
    }
}

/// The selected profile and its secret store.
#[derive(Debug)]
pub struct Session {
    profile: Profile,
    store: SecretStore,
    dir: ConfigDir,
}

impl Session {
    /// Resolve the profile and storage path for this invocation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` or `ConfigError::ProfileNotFound`
    /// when setup has not been run for the profile.
    pub fn open(ctx: &Context) -> Result<Self> {
        let profiles = Profiles::load(&ctx.dir)?;
        let profile = profiles.get(&ctx.profile)?.clone();
        let storage = ctx.dir.storage_path(ctx.storage.as_deref(), &profile);

        debug!(profile = %ctx.profile, storage = %storage.display(), "session opened");

        Ok(Self {
            profile,
            store: SecretStore::new(storage),
            dir: ctx.dir.clone(),
        })
    }

    /// Decrypt the store with the profile's private key.
    pub fn load(&self) -> Result<SecretSet> {
        let identity = Identity::load(&self.key_path(&self.profile.private_key_path))?;
        self.store.load(&identity)
    }

    /// Encrypt the set to the profile's public key and persist it.
    pub fn save(&self, secrets: &SecretSet) -> Result<()> {
        let recipient = Recipient::load(&self.key_path(&self.profile.public_key_path))?;
        self.store.save(secrets, &recipient)
    }

    fn key_path(&self, path: &Path) -> PathBuf {
        self.dir.expand(&path.to_string_lossy())
    }
}
