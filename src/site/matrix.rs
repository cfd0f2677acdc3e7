//! Build matrix of documentation versions from upstream release tags

#[cfg(test)]
use mockall::automock;

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::site::error::TagSourceError;

/// Default base URL for GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Page size requested from the tags API (the GitHub maximum)
const TAGS_PER_PAGE: usize = 100;

/// Upper bound on pages fetched for one repository
const MAX_TAG_PAGES: usize = 20;

/// Name of the matrix entry built from the rolling branch
pub const LATEST_NAME: &str = "latest";

/// One documentation build: the git ref to check out and the label to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub name: String,
}

/// Trait for listing the tags of the documented project
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagSource: Send + Sync {
    /// Fetches tag names of `repo` ("owner/name"), in any order
    async fn fetch_tags(&self, repo: &str) -> Result<Vec<String>, TagSourceError>;
}

/// Response item from the GitHub tags API
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Tag source backed by the GitHub REST API
pub struct GitHubTagSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubTagSource {
    /// Creates a new GitHubTagSource with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, TagSourceError> {
        let client = reqwest::Client::builder()
            .user_agent("docs-version-switcher")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Source for api.github.com
    pub fn github() -> Result<Self, TagSourceError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Authenticate requests (raises the rate limit)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Fetch one page of tag names
    async fn fetch_tag_page(&self, repo: &str, page: usize) -> Result<Vec<String>, TagSourceError> {
        let url = format!(
            "{}/repos/{}/tags?per_page={}&page={}",
            self.base_url, repo, TAGS_PER_PAGE, page
        );
        debug!("Fetching tags: {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TagSourceError::NotFound(repo.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(TagSourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(TagSourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let tags: Vec<Tag> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub tags response: {}", e);
            TagSourceError::InvalidResponse(e.to_string())
        })?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}

#[async_trait::async_trait]
impl TagSource for GitHubTagSource {
    /// Walks the paginated tags listing until a short page comes back
    async fn fetch_tags(&self, repo: &str) -> Result<Vec<String>, TagSourceError> {
        let mut tags = Vec::new();

        for page in 1..=MAX_TAG_PAGES {
            let names = self.fetch_tag_page(repo, page).await?;
            let last_page = names.len() < TAGS_PER_PAGE;
            tags.extend(names);

            if last_page {
                return Ok(tags);
            }
        }

        warn!(
            "Stopped listing tags for {} after {} pages",
            repo, MAX_TAG_PAGES
        );
        Ok(tags)
    }
}

/// Parse a `v`-prefixed tag, padding partial versions ("v4" -> 4.0.0)
fn parse_tag(tag: &str) -> Option<Version> {
    let version = tag.strip_prefix('v')?;
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Build the matrix: the latest branch first, then the `count` newest tags
pub fn build_matrix(latest_branch: &str, tags: &[String], count: usize) -> Vec<MatrixEntry> {
    let mut versioned: Vec<(Version, &String)> = tags
        .iter()
        .filter_map(|tag| match parse_tag(tag) {
            Some(version) => Some((version, tag)),
            None => {
                debug!("Ignoring tag {:?}", tag);
                None
            }
        })
        .collect();
    versioned.sort_by(|a, b| b.0.cmp(&a.0));
    versioned.dedup_by(|a, b| a.1 == b.1);

    std::iter::once(MatrixEntry {
        git_ref: latest_branch.to_string(),
        name: LATEST_NAME.to_string(),
    })
    .chain(versioned.into_iter().take(count).map(|(_, tag)| MatrixEntry {
        git_ref: tag.clone(),
        name: tag.trim_start_matches('v').to_string(),
    }))
    .collect()
}

/// Fetch tags and build the matrix.
///
/// A failing tag source degrades to a matrix with only the latest branch.
pub async fn collect_matrix(
    source: &dyn TagSource,
    repo: &str,
    latest_branch: &str,
    count: usize,
) -> Vec<MatrixEntry> {
    let tags = source.fetch_tags(repo).await.unwrap_or_else(|e| {
        warn!("Failed to list tags for {}: {}", repo, e);
        Vec::new()
    });
    build_matrix(latest_branch, &tags, count)
}
