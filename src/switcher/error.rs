use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Versions catalog unavailable: server returned status {0}")]
    Unavailable(u16),

    #[error("Malformed versions catalog: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// True when the catalog could not be retrieved at all (as opposed to
    /// being retrieved with an unusable body)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::Unavailable(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Malformed(e.to_string())
    }
}
