//! Path prefix matching.
//!
//! Matching is plain string-prefix matching, not segment aware: `/prod`
//! matches `/production/x` as well as `/prod/x`. [`matches`] honors a
//! trailing slash in the filter; [`filtered_sorted_keys`] normalizes it away
//! first, so `/prod/` and `/prod` list the same keys.

use crate::core::domain::SecretSet;

/// Trim one trailing `/` from a non-empty filter other than `/` itself.
pub fn normalize(filter: &str) -> &str {
    if filter.is_empty() || filter == "/" {
        return filter;
    }
    filter.strip_suffix('/').unwrap_or(filter)
}

/// Whether `path` falls under `filter`. The root filter matches everything.
pub fn matches(path: &str, filter: &str) -> bool {
    filter == "/" || path.starts_with(filter)
}

/// Keys matching `filter`, ascending. An empty filter returns every key.
pub fn filtered_sorted_keys<'a>(secrets: &'a SecretSet, filter: &str) -> Vec<&'a str> {
    let filter = normalize(filter);

    // SecretSet iterates in path order already.
    secrets
        .keys()
        .filter(|key| filter.is_empty() || matches(key, filter))
        .collect()
}

/// `(path, value)` pairs whose path starts with `prefix`, taken as given.
///
/// Callers normalize the prefix first; nothing is trimmed here.
pub fn secrets_under<'a>(
    secrets: &'a SecretSet,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    secrets
        .iter()
        .filter(move |(path, _)| path.starts_with(prefix))
}
