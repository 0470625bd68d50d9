//! Input validation for crumb operations.
//!
//! Validates secret paths and values before they reach the store.

use crate::error::{Result, ValidationError};

/// Characters a secret path may not contain, with their display names.
const FORBIDDEN: &[(char, &str)] = &[
    (' ', "spaces"),
    ('=', "'=' character"),
    ('\n', "newlines"),
    ('\t', "tabs"),
    ('\r', "carriage returns"),
];

/// Characters that would split a value across payload lines.
const LINE_BREAKS: &[(char, &str)] = &[('\n', "newlines"), ('\r', "carriage returns")];

/// Validate a secret path.
///
/// Secret paths:
/// - Cannot be empty
/// - Must start with `/`
/// - Cannot contain spaces, `=`, tabs or line breaks
///
/// # Errors
///
/// Returns `ValidationError` describing the first rule the path breaks.
pub fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath.into());
    }

    if !path.starts_with('/') {
        return Err(ValidationError::MissingLeadingSlash(path.to_string()).into());
    }

    for &(ch, what) in FORBIDDEN {
        if path.contains(ch) {
            return Err(ValidationError::InvalidCharacter {
                path: path.to_string(),
                what,
            }
            .into());
        }
    }

    Ok(())
}

/// Validate the value stored under `path`.
///
/// The storage payload holds one `path=value` per line, so a value may not
/// carry a line break of its own.
///
/// # Errors
///
/// Returns `ValidationError::InvalidValue` naming the offending character.
pub fn validate_value(path: &str, value: &str) -> Result<()> {
    for &(ch, what) in LINE_BREAKS {
        if value.contains(ch) {
            return Err(ValidationError::InvalidValue {
                path: path.to_string(),
                what,
            }
            .into());
        }
    }
    Ok(())
}
