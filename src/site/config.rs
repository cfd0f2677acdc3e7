//! `versions.yaml`: the list of documentation trees a site publishes

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::DEVELOP_VERSION;
use crate::site::error::SiteError;
use crate::switcher::detector::is_version_token;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteConfig {
    pub versions: Vec<VersionConfig>,
    #[serde(default)]
    pub build: BuildConfig,
}

/// One published documentation tree
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VersionConfig {
    /// Directory and first URL path segment of the tree (e.g. "v3.4.0")
    pub version_name: String,
    /// Label shown in the switcher, defaults to `version_name`
    #[serde(default)]
    pub display_name: Option<String>,
    /// Site-relative URL of the tree root, defaults to `/<version_name>/`
    #[serde(default)]
    pub url_path: Option<String>,
    /// Git ref the tree was built from
    #[serde(default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub preferred: bool,
}

impl VersionConfig {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.version_name)
    }

    pub fn url_path(&self) -> String {
        self.url_path
            .clone()
            .unwrap_or_else(|| format!("/{}/", self.version_name))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    /// Version the site root redirects to when none is marked preferred
    pub default_version: String,
    /// Accept version names that the switcher cannot detect in a path
    pub allow_custom_names: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            default_version: DEVELOP_VERSION.to_string(),
            allow_custom_names: false,
        }
    }
}

impl SiteConfig {
    /// Load and validate the configuration file
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        if !path.exists() {
            return Err(SiteError::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content)?;
        debug!(
            "Loaded {} versions from {}",
            config.versions.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if self.versions.is_empty() {
            return Err(SiteError::InvalidConfig(
                "at least one version must be defined".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for version in &self.versions {
            let name = version.version_name.as_str();

            if name.is_empty() || name.contains('/') {
                return Err(SiteError::InvalidConfig(format!(
                    "invalid version name {:?}",
                    name
                )));
            }

            // The switcher only recognises develop and v<digits>(.<digits>)*
            // segments; other names would produce pages it cannot switch from
            if !self.build.allow_custom_names && !is_version_token(name) {
                return Err(SiteError::InvalidConfig(format!(
                    "version name {:?} is not a version token (develop or v<digits>[.<digits>...])",
                    name
                )));
            }

            if !seen.insert(name) {
                return Err(SiteError::InvalidConfig(format!(
                    "duplicate version name {:?}",
                    name
                )));
            }
        }

        Ok(())
    }
}
