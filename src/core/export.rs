//! Export resolution.
//!
//! Turns a loaded [`SecretSet`] plus one [`ExportEnvironment`] into the final
//! set of shell variables. Two naming rules exist and are kept apart:
//!
//! - [`suffix_name`]: everything after the environment's path prefix, with
//!   `/` and `-` mapped to `_` (`/svc/db/url` under `/svc` is `DB_URL`).
//! - [`final_segment_name`]: only the last path segment (`/svc/db/url` is
//!   `URL`). Used for single-key export and direct `--path` export.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::core::config::ExportEnvironment;
use crate::core::domain::SecretSet;
use crate::core::path;
use crate::core::types::VarName;
use crate::error::{ExportError, Result};

/// Resolved variables, ordered by name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Exports(BTreeMap<VarName, String>);

impl Exports {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(name, value)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn non_empty(self) -> Result<Self> {
        if self.0.is_empty() {
            return Err(ExportError::NoSecrets.into());
        }
        Ok(self)
    }
}

impl fmt::Debug for Exports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Shell-safe variable name: `-` becomes `_`, then uppercase.
pub fn sanitize_name(name: &str) -> VarName {
    name.replace('-', "_").to_uppercase()
}

/// Name from the part of `path` after `prefix`.
///
/// One trailing `/` on the prefix and one leading `/` on the remainder are
/// dropped; every remaining `/` and `-` becomes `_`. Empty when `path` equals
/// the prefix.
pub fn suffix_name(path: &str, prefix: &str) -> VarName {
    let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    sanitize_name(&rest.replace('/', "_"))
}

/// Name from the last segment of `path` only.
pub fn final_segment_name(path: &str) -> VarName {
    let segment = path.rsplit('/').next().unwrap_or(path);
    sanitize_name(segment)
}

/// Resolve one export environment against the secret set.
///
/// Runs path-prefix expansion, then `env` entries in name order, then
/// `remap` in source-name order.
///
/// # Errors
///
/// Returns `ExportError::NoSecrets` if nothing resolved.
pub fn resolve(environment: &ExportEnvironment, secrets: &SecretSet) -> Result<Exports> {
    let mut vars: BTreeMap<VarName, String> = BTreeMap::new();

    if !environment.path.is_empty() {
        let prefix = environment
            .path
            .strip_suffix('/')
            .unwrap_or(&environment.path);

        for (secret_path, value) in path::secrets_under(secrets, prefix) {
            let name = suffix_name(secret_path, &environment.path);
            if name.is_empty() {
                continue;
            }
            trace!(path = secret_path, name = %name, "prefix match");
            vars.insert(name, value.to_string());
        }
    }

    for (name, source) in &environment.env {
        let name = sanitize_name(name);
        if source.starts_with('/') {
            match secrets.exists(source) {
                Some(value) => {
                    vars.insert(name, value.to_string());
                }
                None => debug!(name = %name, path = %source, "env source missing, skipped"),
            }
        } else {
            vars.insert(name, source.clone());
        }
    }

    for (from, to) in &environment.remap {
        let from = sanitize_name(from);
        let to = sanitize_name(to);
        if let Some(value) = vars.remove(&from) {
            trace!(from = %from, to = %to, "remap");
            vars.insert(to, value);
        }
    }

    debug!(variables = vars.len(), "export resolved");
    Exports(vars).non_empty()
}

/// Export every secret under `prefix`, each named by its final segment.
///
/// One trailing `/` is trimmed from `prefix`. Later paths win when two share a final segment.
///
/// # Errors
///
/// Returns `ExportError::NoSecrets` if nothing matched.
pub fn export_path(secrets: &SecretSet, prefix: &str) -> Result<Exports> {
    let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
    let vars: BTreeMap<VarName, String> = path::secrets_under(secrets, prefix)
        .map(|(path, value)| (final_segment_name(path), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect();

    debug!(prefix, variables = vars.len(), "path export resolved");
    Exports(vars).non_empty()
}
