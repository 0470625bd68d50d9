//! Crumb - local encrypted secret storage with shell export.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── setup         # Profile key pair and storage
//! │   ├── secrets       # ls, set, get, delete, move
//! │   ├── init          # Default .crumb.yaml
//! │   ├── export        # Shell assignments
//! │   ├── import        # .env import
//! │   └── storage       # Per-profile storage file
//! └── core/             # Core library components
//!     ├── cipher/       # Cipher trait and age backend
//!     ├── domain/       # Identity, Recipient, SecretSet
//!     ├── store/        # Encrypted load/save of the secret set
//!     ├── lock          # Advisory file locks
//!     ├── path          # Prefix filtering
//!     ├── export        # Export resolution and variable naming
//!     ├── config        # .crumb.yaml, profiles, settings
//!     ├── env           # .env parsing, shell formatting
//!     └── validation    # Secret path and value rules
//! ```
//!
//! # Features
//!
//! - One age-encrypted file holds every secret, keyed by paths like `/prod/api/key`
//! - OpenSSH (`ssh-ed25519`, `ssh-rsa`) and native age keys
//! - Readers and writers coordinate through `flock`
//! - Declarative export of path prefixes with renames and literal values

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{ConfigDir, ExportEnvironment, ProjectConfig};
pub use crate::core::domain::{Identity, Recipient, SecretSet};
pub use crate::core::export::{resolve, Exports};
pub use crate::core::store::SecretStore;
pub use crate::error::{Error, Result};
