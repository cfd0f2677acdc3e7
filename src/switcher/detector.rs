//! Detects the documentation version a page belongs to from its URL path

use std::sync::LazyLock;

use regex::Regex;

/// A single path segment naming a published tree: `develop` or `v1`, `v3.4.0`, ...
static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:develop|v\d+(?:\.\d+)*)$").expect("valid regex"));

/// Check whether a string is a version token
pub fn is_version_token(token: &str) -> bool {
    VERSION_SEGMENT.is_match(token)
}

/// Return the version token of the first path segment that is one.
///
/// Segments are delimited by `/`, so a token embedded in a longer segment
/// (`/v2-comparison/`) never matches.
pub fn detect_version(path: &str) -> Option<String> {
    path.split('/')
        .find(|segment| is_version_token(segment))
        .map(str::to_string)
}
