//! Recipient type.
//!
//! The public half of the key pair; the storage blob is sealed for it.

use std::fs;
use std::path::Path;

use age::{ssh, x25519};

use crate::error::{CipherError, Result};

enum Inner {
    X25519(x25519::Recipient),
    Ssh(ssh::Recipient),
}

/// A validated public key the storage file is encrypted for.
pub struct Recipient {
    inner: Inner,
    public_key: String,
}

impl Recipient {
    /// Parse a public key string.
    ///
    /// Accepts `ssh-ed25519 ...`, `ssh-rsa ...` and `age1...` keys.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidRecipient` if the key format is invalid.
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();

        let inner = if key.starts_with("age1") {
            Inner::X25519(
                key.parse::<x25519::Recipient>()
                    .map_err(|_| CipherError::InvalidRecipient(key.to_string()))?,
            )
        } else if key.starts_with("ssh-ed25519 ") || key.starts_with("ssh-rsa ") {
            Inner::Ssh(
                key.parse::<ssh::Recipient>()
                    .map_err(|_| CipherError::InvalidRecipient(key.to_string()))?,
            )
        } else {
            return Err(CipherError::InvalidRecipient(
                "public key must be of type ssh-rsa, ssh-ed25519 or age".to_string(),
            )
            .into());
        };

        Ok(Self {
            inner,
            public_key: key.to_string(),
        })
    }

    /// Read and parse a public key file.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFile` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CipherError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub(crate) fn from_x25519(recipient: x25519::Recipient) -> Self {
        let public_key = recipient.to_string();
        Self {
            inner: Inner::X25519(recipient),
            public_key,
        }
    }

    /// Get the public key as written.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Reference to the inner age recipient for encryption.
    pub fn as_age(&self) -> &dyn age::Recipient {
        match &self.inner {
            Inner::X25519(recipient) => recipient,
            Inner::Ssh(recipient) => recipient,
        }
    }
}

impl std::fmt::Debug for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recipient")
            .field("public_key", &self.public_key)
            .finish()
    }
}
