//! Error types.
//!
//! Each concern has its own `thiserror` enum; [`Error`] unifies them so the
//! core can return a single [`Result`] and the CLI can match on the source.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// The user declined an overwrite, move or delete confirmation.
    #[error("operation cancelled")]
    Cancelled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Malformed secret paths.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key path cannot be empty")]
    EmptyPath,

    #[error("key path must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("key path cannot contain {what}: {path:?}")]
    InvalidCharacter { path: String, what: &'static str },

    #[error("value for {path} cannot contain {what}")]
    InvalidValue { path: String, what: &'static str },
}

/// Lookups against the in-memory secret set.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretError {
    #[error("key not found: {0}")]
    NotFound(String),
}

/// Encryption provider failures. Never retried.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("invalid public key: {0}")]
    InvalidRecipient(String),

    #[error("invalid private key: {0}")]
    InvalidIdentity(String),

    #[error("failed to read key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage file access.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read secrets file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write secrets file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Profile, settings and project export configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration not found: run `crumb setup` first")]
    NotInitialized,

    #[error("profile '{0}' not found: run `crumb setup --profile {0}` first")]
    ProfileNotFound(String),

    #[error("no {} found", .0.display())]
    NotFound(PathBuf),

    #[error("invalid {}: missing version", .0.display())]
    MissingVersion(PathBuf),

    #[error("environment '{0}' not found in project config")]
    EnvironmentNotFound(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("unable to determine home directory")]
    NoHome,

    #[error("unsupported shell format: {0} (supported: bash, fish)")]
    UnsupportedShell(String),
}

/// Export resolution.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("no secrets found to export")]
    NoSecrets,
}

pub type Result<T> = std::result::Result<T, Error>;
