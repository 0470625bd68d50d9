//! Configuration files.
//!
//! Three files are involved:
//!
//! - `.crumb.yaml` in the project directory: export environments ([`ProjectConfig`]).
//! - `config.yaml` in the config directory: key pair and storage per profile ([`Profiles`]).
//! - `crumb.toml` in the config directory: user preferences ([`Settings`]).
//!
//! The config directory itself is resolved once at startup into a [`ConfigDir`]
//! and passed down, so nothing below the CLI reads `$HOME` directly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::files;
use crate::core::types::{EnvironmentName, ProfileName, VarName};
use crate::error::{ConfigError, Result, StoreError};

/// Location of the per-user configuration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
    home: Option<PathBuf>,
}

impl ConfigDir {
    /// Config directory at `root`; `home` is used for `~/` expansion.
    pub fn new(root: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            home,
        }
    }

    /// Resolve from the environment.
    ///
    /// `CRUMB_CONFIG_DIR` wins when set; otherwise `~/.config/crumb`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHome` if neither is available.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir();

        if let Some(dir) = std::env::var_os(constants::CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(PathBuf::from(dir), home));
            }
        }

        let root = home
            .as_ref()
            .map(|h| h.join(constants::CONFIG_DIR))
            .ok_or(ConfigError::NoHome)?;
        Ok(Self::new(root, home))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.root.join(constants::PROFILES_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(constants::SETTINGS_FILE)
    }

    /// Storage file used when neither the flag nor the profile names one.
    pub fn default_storage(&self) -> PathBuf {
        self.root.join(constants::STORAGE_FILE)
    }

    /// Storage file offered during setup of a non-default profile.
    pub fn suggested_storage(&self, profile: &str) -> PathBuf {
        self.root
            .join(format!("{}-{}", constants::STORAGE_FILE, profile))
    }

    /// Expand a leading `~/` to the home directory.
    pub fn expand(&self, path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), &self.home) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    /// Storage file for a profile: flag, then profile setting, then default.
    pub fn storage_path(&self, flag: Option<&str>, profile: &Profile) -> PathBuf {
        if let Some(flag) = flag.filter(|f| !f.is_empty()) {
            return self.expand(flag);
        }
        if let Some(storage) = &profile.storage {
            if !storage.as_os_str().is_empty() {
                return self.expand(&storage.to_string_lossy());
            }
        }
        self.default_storage()
    }
}

/// One named export environment from `.crumb.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvironment {
    /// Secret path prefix to export wholesale; empty means inactive.
    #[serde(default, deserialize_with = "scalar_string")]
    pub path: String,
    /// Variable renames applied after resolution.
    #[serde(default, deserialize_with = "scalar_map")]
    pub remap: BTreeMap<VarName, VarName>,
    /// Variable name to literal value, or to a secret path when it starts with `/`.
    #[serde(default, deserialize_with = "scalar_map")]
    pub env: BTreeMap<VarName, String>,
}

/// Project export configuration stored in `.crumb.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default, deserialize_with = "environments")]
    pub environments: BTreeMap<EnvironmentName, ExportEnvironment>,
}

impl ProjectConfig {
    /// Version `1.0` with one empty `default` environment.
    pub fn default_config() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            constants::DEFAULT_ENVIRONMENT.to_string(),
            ExportEnvironment::default(),
        );
        Self {
            version: constants::PROJECT_VERSION.to_string(),
            environments,
        }
    }

    /// Load and validate a project config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is missing,
    /// `ConfigError::ParseYaml` if it is malformed and
    /// `ConfigError::MissingVersion` if it has no version.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading project config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?;

        if config.version.trim().is_empty() {
            return Err(ConfigError::MissingVersion(path.to_path_buf()).into());
        }

        debug!(
            version = %config.version,
            environments = config.environments.len(),
            "project config loaded"
        );
        Ok(config)
    }

    /// Write the config as YAML, owner read/write only.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving project config");
        let contents = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        files::write_private(path, &contents)?;
        Ok(())
    }

    /// Look up an environment by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvironmentNotFound` if it is not defined.
    pub fn environment(&self, name: &str) -> Result<&ExportEnvironment> {
        self.environments
            .get(name)
            .ok_or_else(|| ConfigError::EnvironmentNotFound(name.to_string()).into())
    }
}

/// Key pair and storage location of one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub public_key_path: PathBuf,
    pub private_key_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<PathBuf>,
}

/// All profiles, stored in `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profiles {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profiles: BTreeMap<ProfileName, Profile>,
}

impl Profiles {
    /// Load the profiles file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if setup has never run.
    pub fn load(dir: &ConfigDir) -> Result<Self> {
        let path = dir.profiles_path();
        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        Self::read(&path)
    }

    /// Load the profiles file, or start empty if it does not exist yet.
    pub fn load_or_default(dir: &ConfigDir) -> Result<Self> {
        let path = dir.profiles_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(&path)
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading profiles");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let profiles: Self =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(profiles = profiles.profiles.len(), "profiles loaded");
        Ok(profiles)
    }

    /// Write the profiles file, creating the config directory if needed.
    pub fn save(&self, dir: &ConfigDir) -> Result<()> {
        files::create_private_dir(dir.root()).map_err(|source| StoreError::CreateDir {
            path: dir.root().to_path_buf(),
            source,
        })?;

        let path = dir.profiles_path();
        debug!(path = %path.display(), profiles = self.profiles.len(), "saving profiles");
        let contents = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        files::write_private(&path, &contents)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ProfileNotFound` if `name` was never set up.
    pub fn get(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()).into())
    }

    pub fn insert(&mut self, name: impl Into<ProfileName>, profile: Profile) {
        self.profiles.insert(name.into(), profile);
    }

    /// Point a profile at a custom storage file.
    pub fn set_storage(&mut self, name: &str, storage: PathBuf) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
        profile.storage = Some(storage);
        Ok(())
    }

    /// Drop a profile's custom storage so it falls back to the default.
    ///
    /// Returns whether the profile exists.
    pub fn clear_storage(&mut self, name: &str) -> bool {
        match self.profiles.get_mut(name) {
            Some(profile) => {
                profile.storage = None;
                true
            }
            None => false,
        }
    }
}

/// User preferences from `crumb.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Default output shell for `export` and `get --export`.
    #[serde(default)]
    pub shell: Option<String>,
}

impl Settings {
    /// Load settings; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseToml` if the file is not valid TOML.
    pub fn load(dir: &ConfigDir) -> Result<Self> {
        let path = dir.settings_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Self = toml::from_str(&contents)
            .map_err(|source| ConfigError::ParseToml { path, source })?;
        debug!(shell = ?settings.shell, "settings loaded");
        Ok(settings)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Environments map where an environment with no body is an empty one.
fn environments<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<EnvironmentName, ExportEnvironment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<EnvironmentName, Option<ExportEnvironment>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, env)| (name, env.unwrap_or_default()))
        .collect())
}

/// Render a YAML scalar as text; `null` becomes empty.
fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => Some(String::new()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        _ => None,
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| serde::de::Error::custom("expected a scalar value"))
}

fn scalar_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_yaml::Value>> = Option::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| match scalar_to_string(value) {
            Some(value) => Ok((key, value)),
            None => Err(serde::de::Error::custom(format!(
                "expected a scalar value for '{}'",
                key
            ))),
        })
        .collect()
}
