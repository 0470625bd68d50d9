//! Core library components.
//!
//! Everything below the CLI: the encrypted store, path matching, export
//! resolution and configuration handling. Nothing here prompts or prints.

pub mod cipher;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod domain;
pub mod env;
pub mod export;
pub mod files;
pub mod lock;
pub mod path;
pub mod store;
pub mod types;
pub mod validation;
