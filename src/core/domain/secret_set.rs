//! SecretSet type.
//!
//! The decrypted record set: secret paths mapped to plaintext values, plus
//! the line-oriented plaintext format it is persisted in.

use std::collections::BTreeMap;

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::core::confirm::Confirm;
use crate::core::types::{SecretPath, SecretValue};
use crate::error::{Error, Result, SecretError};

/// The plaintext secret set.
///
/// Keys are unique. Iteration is ordered by path. Values are wiped on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    entries: BTreeMap<SecretPath, SecretValue>,
}

impl SecretSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the decrypted plaintext payload.
    ///
    /// Each line is trimmed and blank lines are skipped. The path is the text
    /// before the first `=` and the value the text after it, both trimmed.
    /// Lines without `=` are dropped so one damaged record does not make the
    /// whole store unreadable.
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut dropped = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.split_once('=') {
                Some((path, value)) => {
                    entries.insert(path.trim().to_string(), value.trim().to_string());
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "skipped malformed records");
        }

        Self { entries }
    }

    /// Serialize to the plaintext payload.
    ///
    /// `path=value` lines sorted by the full line and joined with `\n`,
    /// without a trailing newline.
    pub fn serialize(&self) -> Zeroizing<String> {
        let mut lines: Zeroizing<Vec<String>> = Zeroizing::new(
            self.entries
                .iter()
                .map(|(path, value)| format!("{}={}", path, value))
                .collect(),
        );
        lines.sort();
        Zeroizing::new(lines.join("\n"))
    }

    /// Value stored at `path`, if any
    pub fn exists(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Value stored at `path`
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the path is absent.
    pub fn get(&self, path: &str) -> Result<&str> {
        self.exists(path)
            .ok_or_else(|| SecretError::NotFound(path.to_string()).into())
    }

    /// Insert or overwrite a secret.
    ///
    /// The value is trimmed the same way `parse` trims it, so a saved set
    /// loads back equal.
    pub fn set(&mut self, path: impl Into<SecretPath>, value: impl Into<SecretValue>) {
        self.entries.insert(path.into(), trimmed(value.into()));
    }

    /// Remove a secret. Returns `false` if it was absent.
    pub fn delete(&mut self, path: &str) -> bool {
        match self.entries.remove(path) {
            Some(mut value) => {
                value.zeroize();
                true
            }
            None => false,
        }
    }

    /// Move a secret to a new path.
    ///
    /// If `new` already holds a value, `confirm` decides whether it may be
    /// replaced. Moving a path onto itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if `old` is absent and
    /// `Error::Cancelled` if the overwrite is declined; the set is left
    /// untouched in both cases.
    pub fn move_to(&mut self, old: &str, new: &str, confirm: &dyn Confirm) -> Result<()> {
        if !self.entries.contains_key(old) {
            return Err(SecretError::NotFound(old.to_string()).into());
        }

        if old == new {
            return Ok(());
        }

        if self.entries.contains_key(new)
            && !confirm.confirm(&format!("Key '{}' already exists. Overwrite?", new))
        {
            return Err(Error::Cancelled);
        }

        if let Some(value) = self.entries.remove(old) {
            self.entries.insert(new.to_string(), value);
        }

        Ok(())
    }

    /// All paths in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All `(path, value)` pairs in ascending path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, value)| (path.as_str(), value.as_str()))
    }

    /// Number of secrets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, V> FromIterator<(P, V)> for SecretSet
where
    P: Into<SecretPath>,
    V: Into<SecretValue>,
{
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(path, value)| (path.into(), trimmed(value.into())))
                .collect(),
        }
    }
}

/// `value` without surrounding whitespace. A replaced buffer is wiped.
fn trimmed(mut value: SecretValue) -> SecretValue {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        return value;
    }
    let owned = trimmed.to_string();
    value.zeroize();
    owned
}

impl Drop for SecretSet {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

impl std::fmt::Debug for SecretSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSet")
            .field("paths", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
