//! Encrypted secret storage.
//!
//! A [`SecretStore`] owns the location of the storage file and the cipher
//! used to seal it. It loads the whole [`SecretSet`] in one go and writes it
//! back in one go; all CRUD happens on the in-memory set in between.
//!
//! ## Example
//!
//! ```ignore
//! let store = SecretStore::new(&storage_path);
//! let mut secrets = store.load(&identity)?;
//! secrets.set("/prod/api/key", "abc123");
//! store.save(&secrets, &recipient)?;
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::cipher::{Age, Cipher};
use crate::core::domain::SecretSet;
use crate::core::validation::validate_value;
use crate::core::{files, lock};
use crate::error::{Result, StoreError};

/// The encrypted storage file and the cipher that seals it.
#[derive(Debug, Clone)]
pub struct SecretStore<C = Age> {
    path: PathBuf,
    cipher: C,
}

impl SecretStore<Age> {
    /// Store at `path` sealed with age.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cipher(path, Age)
    }
}

impl<C: Cipher> SecretStore<C> {
    /// Store at `path` sealed with a custom cipher.
    pub fn with_cipher(path: impl Into<PathBuf>, cipher: C) -> Self {
        Self {
            path: path.into(),
            cipher,
        }
    }

    /// Storage file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the storage file exists yet.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and decrypt the secret set.
    ///
    /// A missing file, an empty file, and an empty decrypted payload all
    /// yield an empty set.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if `identity` cannot open the
    /// blob, `StoreError` on read or lock failure.
    pub fn load(&self, identity: &C::Identity) -> Result<SecretSet> {
        debug!(path = %self.path.display(), "loading secrets");

        if !self.path.exists() {
            debug!("storage file missing, starting empty");
            return Ok(SecretSet::new());
        }

        let encrypted = lock::read_locked(&self.path)?;
        if encrypted.is_empty() {
            return Ok(SecretSet::new());
        }

        let plaintext = self.cipher.decrypt(&encrypted, identity)?;
        let secrets = SecretSet::parse(&plaintext);

        debug!(
            secrets = secrets.len(),
            cipher = self.cipher.name(),
            "secrets loaded"
        );
        Ok(secrets)
    }

    /// Encrypt and persist the secret set, replacing the file's content.
    ///
    /// Nothing is written if any value holds a line break.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidValue`, `CipherError::EncryptionFailed`
    /// or `StoreError`.
    pub fn save(&self, secrets: &SecretSet, recipient: &C::Recipient) -> Result<()> {
        debug!(path = %self.path.display(), secrets = secrets.len(), "saving secrets");
        for (path, value) in secrets.iter() {
            validate_value(path, value)?;
        }
        self.write(&secrets.serialize(), recipient)
    }

    /// Write an encrypted empty payload, creating the parent directory.
    ///
    /// Used for first-time initialization.
    pub fn create_empty(&self, recipient: &C::Recipient) -> Result<()> {
        debug!(path = %self.path.display(), "creating empty store");
        self.ensure_parent()?;
        self.write("", recipient)
    }

    fn write(&self, plaintext: &str, recipient: &C::Recipient) -> Result<()> {
        let encrypted = self
            .cipher
            .encrypt(plaintext, std::slice::from_ref(&recipient))?;
        lock::write_locked(&self.path, &encrypted)
    }

    fn ensure_parent(&self) -> Result<()> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }

        files::create_private_dir(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
