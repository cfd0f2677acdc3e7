//! Computes the equivalent page path under another version

/// Remove the first `/<version>` segment from `path`, collapsing it to `/`.
///
/// Only a whole segment is removed: it must be followed by `/` or the end of
/// the path, so `/v1.0` is untouched inside `/v1.0.1/`.
pub fn strip_version_segment(path: &str, version: &str) -> String {
    if version.is_empty() {
        return path.to_string();
    }

    let needle = format!("/{}", version);
    let mut search_from = 0;

    while let Some(offset) = path[search_from..].find(&needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        let rest = &path[end..];

        if rest.is_empty() {
            return format!("{}/", &path[..start]);
        }
        if let Some(after) = rest.strip_prefix('/') {
            return format!("{}/{}", &path[..start], after);
        }

        search_from = start + 1;
    }

    path.to_string()
}

/// Full URL of the page `pathname` under version `target`.
///
/// Returns `None` when the switch is a no-op: `target` is empty or equals
/// the current version.
pub fn destination(
    origin: &str,
    pathname: &str,
    current: Option<&str>,
    target: &str,
) -> Option<String> {
    if target.is_empty() || current == Some(target) {
        return None;
    }

    let mut path = match current {
        Some(version) => strip_version_segment(pathname, version),
        None => pathname.to_string(),
    };

    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    Some(format!("{}/{}{}", origin.trim_end_matches('/'), target, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ORIGIN: &str = "https://docs.example.org";

    #[rstest]
    #[case("/v3.4.0/docs/install", "v3.4.0", "/docs/install")]
    #[case("/v3.4.0/", "v3.4.0", "/")]
    #[case("/v3.4.0", "v3.4.0", "/")]
    #[case("/site/develop/api/", "develop", "/site/api/")]
    #[case("/v1.0.1/docs", "v1.0", "/v1.0.1/docs")] // prefix of another segment
    #[case("/v1.0.1/v1.0/docs", "v1.0", "/v1.0.1/docs")]
    #[case("/docs/install", "v3.4.0", "/docs/install")]
    #[case("/v1/docs/v1/page", "v1", "/docs/v1/page")] // first occurrence only
    #[case("/v1x0/docs", "v1.0", "/v1x0/docs")] // dots are literal
    fn strip_version_segment_removes_exact_segment(
        #[case] path: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(strip_version_segment(path, version), expected);
    }

    #[test]
    fn destination_replaces_current_version() {
        assert_eq!(
            destination(ORIGIN, "/v3.4.0/docs/install", Some("v3.4.0"), "develop"),
            Some(format!("{}/develop/docs/install", ORIGIN))
        );
    }

    #[test]
    fn destination_prefixes_unversioned_path() {
        assert_eq!(
            destination(ORIGIN, "/docs/install", None, "v3.4.0"),
            Some(format!("{}/v3.4.0/docs/install", ORIGIN))
        );
    }

    #[test]
    fn destination_makes_relative_path_absolute() {
        assert_eq!(
            destination(ORIGIN, "docs/install", None, "develop"),
            Some(format!("{}/develop/docs/install", ORIGIN))
        );
    }

    #[test]
    fn destination_from_version_root() {
        assert_eq!(
            destination(ORIGIN, "/develop/", Some("develop"), "v1"),
            Some(format!("{}/v1/", ORIGIN))
        );
    }

    #[rstest]
    #[case(Some("v3.4.0"), "v3.4.0")]
    #[case(Some("v3.4.0"), "")]
    #[case(None, "")]
    fn destination_is_none_for_noop_switch(#[case] current: Option<&str>, #[case] target: &str) {
        assert_eq!(destination(ORIGIN, "/v3.4.0/docs", current, target), None);
    }

    #[rstest]
    #[case("/v3.4.0/docs/install", "v3.4.0", "develop")]
    #[case("/develop/", "develop", "v1.2")]
    #[case("/v1/api/v1/types", "v1", "v2")]
    fn switching_there_and_back_restores_path(
        #[case] path: &str,
        #[case] a: &str,
        #[case] b: &str,
    ) {
        let there = destination(ORIGIN, path, Some(a), b).unwrap();
        let there_path = there.strip_prefix(ORIGIN).unwrap();

        let back = destination(ORIGIN, there_path, Some(b), a).unwrap();
        assert_eq!(back, format!("{}{}", ORIGIN, path));
    }
}
