//! Catalog sources for the version switcher

#[cfg(test)]
use mockall::automock;

use reqwest::Client;
use tracing::debug;

use crate::config::VERSIONS_PATH;
use crate::switcher::catalog::VersionCatalog;
use crate::switcher::error::CatalogError;

/// Trait for retrieving the versions catalog
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the catalog once
    ///
    /// # Returns
    /// * `Ok(VersionCatalog)` - Versions in published order
    /// * `Err(CatalogError)` - If the catalog is unavailable or malformed
    async fn fetch_catalog(&self) -> Result<VersionCatalog, CatalogError>;
}

/// Fetches `versions.json` from the documentation site over HTTP
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    /// Source for the catalog at the default path under `origin`
    pub fn new(origin: &str) -> Self {
        Self::with_path(origin, VERSIONS_PATH)
    }

    pub fn with_path(origin: &str, path: &str) -> Self {
        let path = path.trim_start_matches('/');
        Self {
            client: Client::new(),
            url: format!("{}/{}", origin.trim_end_matches('/'), path),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<VersionCatalog, CatalogError> {
        debug!("Fetching versions catalog: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Unavailable(status.as_u16()));
        }

        // Body read failures happen after a successful status; treat them as
        // transport errors rather than as a bad payload
        let body = response.text().await?;

        VersionCatalog::from_json(&body)
    }
}
