//! Versions catalog published next to the documentation trees

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::switcher::error::CatalogError;

/// One published documentation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    /// Version token used as the first path segment (e.g. "v3.4.0", "develop")
    pub version: String,
    /// Human readable label
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub preferred: bool,
}

impl VersionDescriptor {
    pub fn new(version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
            url: None,
            preferred: false,
        }
    }
}

/// Entry as it appears on the wire; every field is optional so that
/// incomplete entries can be repaired or skipped individually
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    /// `null` is written for a bare `preferred:` key in versions.yaml
    #[serde(default)]
    preferred: Option<bool>,
}

/// Both accepted payload shapes; entries stay untyped until each one is
/// converted on its own
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Bare(Vec<Value>),
    Wrapped { versions: Vec<Value> },
}

/// Ordered set of published versions, keyed by version token.
///
/// Iteration follows payload order; a token appearing twice keeps its first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCatalog {
    entries: IndexMap<String, VersionDescriptor>,
}

impl VersionCatalog {
    pub fn new(descriptors: Vec<VersionDescriptor>) -> Self {
        let mut entries = IndexMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if entries.contains_key(&descriptor.version) {
                warn!("Duplicate version {:?} in catalog, keeping first", descriptor.version);
                continue;
            }
            entries.insert(descriptor.version.clone(), descriptor);
        }
        Self { entries }
    }

    /// Parse a catalog from a JSON document
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Build a catalog from either a bare array or an object with a `versions` array
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let payload: CatalogPayload = serde_json::from_value(value).map_err(|_| {
            CatalogError::Malformed(
                "expected an array of versions or an object with a `versions` array".to_string(),
            )
        })?;

        let raw = match payload {
            CatalogPayload::Bare(raw) => raw,
            CatalogPayload::Wrapped { versions } => versions,
        };

        let descriptors = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<RawDescriptor>(entry) {
                Ok(raw) => resolve_descriptor(raw),
                Err(e) => {
                    warn!("Skipping catalog entry #{}: {}", index, e);
                    None
                }
            })
            .collect();
        let catalog = Self::new(descriptors);
        debug!("Parsed catalog with {} versions", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.entries.contains_key(version)
    }

    pub fn get(&self, version: &str) -> Option<&VersionDescriptor> {
        self.entries.get(version)
    }

    /// Descriptors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &VersionDescriptor> {
        self.entries.values()
    }

    /// The first entry flagged as preferred
    pub fn preferred(&self) -> Option<&VersionDescriptor> {
        self.iter().find(|d| d.preferred)
    }
}

/// Turn a wire entry into a descriptor.
///
/// Entries without a `version` take their token from a single-segment `url`
/// ("/v1.0/" -> "v1.0"); if that is not possible the entry is dropped rather
/// than producing a destination with an empty segment.
fn resolve_descriptor(raw: RawDescriptor) -> Option<VersionDescriptor> {
    let version = raw
        .version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| raw.url.as_deref().and_then(token_from_url));

    let Some(version) = version else {
        warn!(
            "Skipping catalog entry without a version (name: {:?}, url: {:?})",
            raw.name, raw.url
        );
        return None;
    };

    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| version.clone());

    Some(VersionDescriptor {
        version,
        name,
        url: raw.url,
        preferred: raw.preferred.unwrap_or(false),
    })
}

fn token_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains('/') {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(catalog: &VersionCatalog) -> Vec<&str> {
        catalog.iter().map(|d| d.version.as_str()).collect()
    }

    #[test]
    fn from_json_accepts_bare_array() {
        let catalog = VersionCatalog::from_json(
            r#"[
                {"version": "develop", "name": "latest (develop)"},
                {"version": "v3.4.0", "name": "3.4.0", "url": "/v3.4.0/", "preferred": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["develop", "v3.4.0"]);
        assert_eq!(catalog.get("develop").unwrap().name, "latest (develop)");
        assert_eq!(catalog.preferred().unwrap().version, "v3.4.0");
    }

    #[test]
    fn from_json_accepts_object_wrapped_versions() {
        let catalog =
            VersionCatalog::from_json(r#"{ "versions": [{"version":"v1","name":"One"}] }"#)
                .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("v1"), Some(&VersionDescriptor::new("v1", "One")));
    }

    #[test]
    fn both_shapes_produce_identical_catalogs() {
        let entries = json!([
            {"version": "v2.0", "name": "2.0"},
            {"version": "v1.0", "name": "1.0"}
        ]);

        let bare = VersionCatalog::from_value(entries.clone()).unwrap();
        let wrapped = VersionCatalog::from_value(json!({ "versions": entries })).unwrap();

        assert_eq!(bare, wrapped);
    }

    #[test]
    fn from_json_preserves_payload_order() {
        let catalog = VersionCatalog::from_value(json!([
            {"version": "v1.0", "name": "1.0"},
            {"version": "develop", "name": "dev"},
            {"version": "v3.0", "name": "3.0"}
        ]))
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["v1.0", "develop", "v3.0"]);
    }

    #[test]
    fn from_json_rejects_invalid_json() {
        let result = VersionCatalog::from_json("{ not json");
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn from_value_rejects_unexpected_shapes() {
        for value in [json!("v1"), json!({"releases": []}), json!(42), json!(null)] {
            let result = VersionCatalog::from_value(value);
            assert!(matches!(result, Err(CatalogError::Malformed(_))));
        }
    }

    #[test]
    fn entries_without_version_fall_back_to_url_token() {
        let catalog = VersionCatalog::from_value(json!({
            "versions": [
                {"name": "v4.0", "url": "/v4.0/"},
                {"name": "develop", "url": "/develop/"}
            ]
        }))
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["v4.0", "develop"]);
    }

    #[test]
    fn entries_without_usable_version_are_skipped() {
        let catalog = VersionCatalog::from_value(json!([
            {"name": "no version"},
            {"version": "", "name": "empty"},
            {"version": "  ", "url": "/a/b/"},
            {"version": "v1", "name": "One"}
        ]))
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["v1"]);
    }

    #[test]
    fn null_preferred_is_treated_as_not_preferred() {
        let catalog = VersionCatalog::from_value(json!([
            {"version": "develop", "name": "dev", "preferred": null},
            {"version": "v1", "name": "One"}
        ]))
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["develop", "v1"]);
        assert!(!catalog.get("develop").unwrap().preferred);
        assert!(catalog.preferred().is_none());
    }

    #[test]
    fn wrongly_typed_entry_is_skipped_without_rejecting_others() {
        let catalog = VersionCatalog::from_value(json!({
            "versions": [
                {"version": 3, "name": "Three"},
                "v2",
                {"version": "v1", "name": "One", "preferred": "yes"},
                {"version": "v1.1", "name": "One.One"}
            ]
        }))
        .unwrap();

        assert_eq!(tokens(&catalog), vec!["v1.1"]);
    }

    #[test]
    fn missing_name_defaults_to_version_token() {
        let catalog = VersionCatalog::from_value(json!([{"version": "v2"}])).unwrap();
        assert_eq!(catalog.get("v2").unwrap().name, "v2");
    }

    #[test]
    fn duplicate_tokens_keep_first_entry() {
        let catalog = VersionCatalog::from_value(json!([
            {"version": "v1", "name": "first"},
            {"version": "v1", "name": "second"}
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("v1").unwrap().name, "first");
    }
}
