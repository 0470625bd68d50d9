//! Constants used throughout crumb.
//!
//! Centralizes magic strings and configuration values.

/// Per-project export configuration file name.
pub const PROJECT_FILE: &str = ".crumb.yaml";

/// Version tag written by `crumb init`.
pub const PROJECT_VERSION: &str = "1.0";

/// Environment used by `crumb export` when none is named.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Profile used when `--profile` is not given.
pub const DEFAULT_PROFILE: &str = "default";

/// Profile file inside the config directory.
pub const PROFILES_FILE: &str = "config.yaml";

/// User settings file inside the config directory.
pub const SETTINGS_FILE: &str = "crumb.toml";

/// Default storage file name inside the config directory.
pub const STORAGE_FILE: &str = "secrets";

/// Config directory relative to HOME (`~/.config/crumb`).
pub const CONFIG_DIR: &str = ".config/crumb";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CRUMB_CONFIG_DIR";

/// Mode for the storage file and every config file we write.
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o600;

/// Mode for directories we create.
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o700;
