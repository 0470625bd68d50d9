//! Identity type.
//!
//! Wraps the private half of the key pair that opens the storage blob.
//! Accepts unencrypted OpenSSH keys (`ssh-ed25519`, `ssh-rsa`) through age's
//! SSH support, and native age x25519 keys (`AGE-SECRET-KEY-1...`).

use std::fs;
use std::path::Path;

use age::{ssh, x25519};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::Recipient;
use crate::error::{CipherError, Result};

const AGE_SECRET_PREFIX: &str = "AGE-SECRET-KEY-";

enum Inner {
    X25519(x25519::Identity),
    Ssh(ssh::Identity),
}

/// A private key identity for decrypting the storage file
pub struct Identity {
    inner: Inner,
}

impl Identity {
    /// Load an identity from a private key file
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFile` if the file cannot be read and
    /// `CipherError::InvalidIdentity` if its contents are not a usable key.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading identity");

        #[cfg(unix)]
        warn_if_exposed(path);

        let contents = Zeroizing::new(fs::read(path).map_err(|source| CipherError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?);

        let identity = Self::parse(&contents, Some(path.display().to_string()))?;

        debug!(kind = identity.kind(), "identity loaded");
        Ok(identity)
    }

    /// Parse an identity from raw key file contents
    ///
    /// `source` names the key in error messages.
    pub fn parse(contents: &[u8], source: Option<String>) -> Result<Self> {
        let text = String::from_utf8_lossy(contents);
        if let Some(line) = text
            .lines()
            .map(str::trim)
            .find(|l| l.starts_with(AGE_SECRET_PREFIX))
        {
            let inner: x25519::Identity = line
                .parse()
                .map_err(|e: &str| CipherError::InvalidIdentity(e.to_string()))?;
            return Ok(Self {
                inner: Inner::X25519(inner),
            });
        }

        let identity = ssh::Identity::from_buffer(contents, source)
            .map_err(|e| CipherError::InvalidIdentity(e.to_string()))?;

        match identity {
            ssh::Identity::Unencrypted(_) => Ok(Self {
                inner: Inner::Ssh(identity),
            }),
            ssh::Identity::Encrypted(_) => Err(CipherError::InvalidIdentity(
                "passphrase-protected SSH keys are not supported".to_string(),
            )
            .into()),
            ssh::Identity::Unsupported(_) => {
                Err(CipherError::InvalidIdentity("unsupported SSH key type".to_string()).into())
            }
        }
    }

    /// Generate a fresh x25519 identity (not written anywhere)
    pub fn generate() -> Self {
        Self {
            inner: Inner::X25519(x25519::Identity::generate()),
        }
    }

    /// Matching recipient, when it can be derived from the private key
    ///
    /// Only x25519 identities carry their public half; SSH identities return `None`.
    pub fn recipient(&self) -> Option<Recipient> {
        match &self.inner {
            Inner::X25519(identity) => Some(Recipient::from_x25519(identity.to_public())),
            Inner::Ssh(_) => None,
        }
    }

    /// Reference to the inner age identity for decryption
    pub fn as_age(&self) -> &dyn age::Identity {
        match &self.inner {
            Inner::X25519(identity) => identity,
            Inner::Ssh(identity) => identity,
        }
    }

    fn kind(&self) -> &'static str {
        match self.inner {
            Inner::X25519(_) => "x25519",
            Inner::Ssh(_) => "ssh",
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(unix)]
fn warn_if_exposed(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}
