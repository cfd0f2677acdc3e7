//! Catalog source test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use mockito::{Mock, ServerGuard};

use docs_version_switcher::switcher::catalog::{VersionCatalog, VersionDescriptor};
use docs_version_switcher::switcher::error::CatalogError;
use docs_version_switcher::switcher::loader::CatalogSource;

/// Catalog source answering with a fixed catalog or a fixed HTTP status
pub struct StaticCatalogSource {
    versions: Vec<(String, String)>,
    status: Option<u16>,
}

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            status: None,
        }
    }

    pub fn with_version(mut self, version: &str, name: &str) -> Self {
        self.versions.push((version.to_string(), name.to_string()));
        self
    }

    /// Fail every fetch as if the server answered with `status`
    pub fn failing_with(status: u16) -> Self {
        Self {
            versions: Vec::new(),
            status: Some(status),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> Result<VersionCatalog, CatalogError> {
        if let Some(status) = self.status {
            return Err(CatalogError::Unavailable(status));
        }
        Ok(VersionCatalog::new(
            self.versions
                .iter()
                .map(|(version, name)| VersionDescriptor::new(version.clone(), name.clone()))
                .collect(),
        ))
    }
}

/// Register `GET /versions.json` on the server answering `status` with `body`
pub async fn serve_catalog(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/versions.json")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
