//! `.env` parsing and shell assignment formatting.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::{ConfigError, Error, Result};

/// A parsed `.env` file.
///
/// Later duplicates of a key replace earlier ones.
#[derive(Clone)]
pub struct DotEnv {
    entries: BTreeMap<String, String>,
    path: PathBuf,
}

impl DotEnv {
    /// Read and parse a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let env = Self::parse(&contents, path.to_path_buf());
        debug!(path = %path.display(), entries = env.len(), "dotenv loaded");
        Ok(env)
    }

    /// Parse `.env` content.
    ///
    /// Blank lines and `#` comments are skipped, an `export ` prefix is
    /// tolerated and lines without `=` or with an empty key are ignored.
    pub fn parse(contents: &str, path: PathBuf) -> Self {
        let mut entries = BTreeMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                entries.insert(key.to_string(), parse_value(value.trim()));
            }
        }

        Self { entries, path }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for DotEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DotEnv")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("path", &self.path)
            .finish()
    }
}

/// Strip one pair of matching quotes. Escapes are kept as written.
fn parse_value(raw: &str) -> String {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return raw[1..raw.len() - 1].to_string();
        }
    }
    raw.to_string()
}

/// Output dialect for variable assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shell {
    #[default]
    Bash,
    Fish,
}

impl Shell {
    /// One assignment line, without trailing newline.
    pub fn assignment(&self, name: &str, value: &str) -> String {
        match self {
            Shell::Bash => format!("export {}={}", name, self.quote(value)),
            Shell::Fish => format!("set -x {} {}", name, self.quote(value)),
        }
    }

    /// Quote `value` if the shell would otherwise split or expand it.
    pub fn quote(&self, value: &str) -> String {
        if !needs_quotes(value) {
            return value.to_string();
        }

        match self {
            Shell::Bash => format!("'{}'", value.replace('\'', r"'\''")),
            Shell::Fish => format!(
                "'{}'",
                value.replace('\\', r"\\").replace('\'', r"\'")
            ),
        }
    }
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bash" | "sh" | "zsh" => Ok(Shell::Bash),
            "fish" => Ok(Shell::Fish),
            _ => Err(ConfigError::UnsupportedShell(s.to_string()).into()),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => f.write_str("bash"),
            Shell::Fish => f.write_str("fish"),
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || !value.chars().all(|ch| {
            ch.is_ascii_alphanumeric()
                || matches!(ch, '_' | '-' | '.' | '/' | ':' | '@' | '%' | '+' | ',' | '=')
        })
}
