//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A hierarchical secret identifier (e.g., `/prod/api/key`).
///
/// Must start with `/` and contain no space, `=`, tab, or newline.
pub type SecretPath = String;

/// A plaintext secret value. May be empty and may contain `=`.
pub type SecretValue = String;

/// A shell environment variable name (e.g., `AUTH_TOKEN`).
pub type VarName = String;

/// A named export environment inside `.crumb.yaml`.
pub type EnvironmentName = String;

/// A profile name from the user configuration.
pub type ProfileName = String;
