use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Switcher constants
// =============================================================================

/// Site-root relative path of the published versions catalog
pub const VERSIONS_PATH: &str = "/versions.json";

/// Element id of the injected banner, used to keep mounting idempotent
pub const BANNER_ID: &str = "version-banner";

/// Element id of the version selection control
pub const SELECT_ID: &str = "version-select";

/// Token of the rolling development tree
pub const DEVELOP_VERSION: &str = "develop";

/// Switcher configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitcherConfig {
    /// Path of the versions catalog relative to the site origin
    pub versions_path: String,
    pub labels: BannerLabels,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            versions_path: VERSIONS_PATH.to_string(),
            labels: BannerLabels::default(),
        }
    }
}

/// Texts rendered inside the banner
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BannerLabels {
    pub label: String,
    pub loading: String,
    pub unavailable: String,
}

impl Default for BannerLabels {
    fn default() -> Self {
        Self {
            label: "Version:".to_string(),
            loading: "Loading...".to_string(),
            unavailable: "Version info unavailable".to_string(),
        }
    }
}

/// Returns the path to the data directory for docs-version-switcher.
/// Uses $XDG_DATA_HOME/docs-version-switcher if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/docs-version-switcher,
/// or ./docs-version-switcher if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("docs-version-switcher.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("docs-version-switcher")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn switcher_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<SwitcherConfig>(json!({
            "versionsPath": "/docs/versions.json"
        }))
        .unwrap();

        assert_eq!(result.versions_path, "/docs/versions.json");
        assert_eq!(result.labels, BannerLabels::default());
    }

    #[test]
    fn switcher_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<SwitcherConfig>(json!({
            "versionsPath": "/v.json",
            "labels": {
                "label": "Release:",
                "loading": "...",
                "unavailable": "n/a"
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            SwitcherConfig {
                versions_path: "/v.json".to_string(),
                labels: BannerLabels {
                    label: "Release:".to_string(),
                    loading: "...".to_string(),
                    unavailable: "n/a".to_string(),
                }
            }
        );
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/docs-version-switcher"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/docs-version-switcher")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./docs-version-switcher"));
    }
}
