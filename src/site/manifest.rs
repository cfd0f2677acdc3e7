//! `versions.json` generation

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::site::config::SiteConfig;
use crate::site::error::SiteError;

/// File name of the manifest at the site root
pub const MANIFEST_FILE: &str = "versions.json";

/// One entry of the published catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
    pub url: String,
    pub preferred: bool,
}

/// Build the manifest entries in configuration order
pub fn generate_manifest(config: &SiteConfig) -> Vec<ManifestEntry> {
    config
        .versions
        .iter()
        .map(|version| ManifestEntry {
            name: version.display_name().to_string(),
            version: version.version_name.clone(),
            url: version.url_path(),
            preferred: version.preferred,
        })
        .collect()
}

/// Serialize entries as the pretty-printed bare-array form
pub fn render_manifest(entries: &[ManifestEntry]) -> Result<String, SiteError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write `versions.json` into `dir`, returning its path
pub fn write_manifest(dir: &Path, entries: &[ManifestEntry]) -> Result<PathBuf, SiteError> {
    std::fs::create_dir_all(dir).map_err(|source| SiteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(MANIFEST_FILE);
    let content = render_manifest(entries)?;
    std::fs::write(&path, content).map_err(|source| SiteError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Created {} with {} versions", path.display(), entries.len());
    Ok(path)
}

/// List the version directories already built under `root`.
///
/// Entries are sorted by directory name; hidden directories and plain files
/// are ignored. A missing root yields an empty list.
pub fn scan_built_versions(root: &Path) -> Result<Vec<ManifestEntry>, SiteError> {
    if !root.is_dir() {
        debug!("No built versions at {}", root.display());
        return Ok(Vec::new());
    }

    let read_dir = std::fs::read_dir(root).map_err(|source| SiteError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SiteError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| ManifestEntry {
            url: format!("/{}/", name),
            version: name.clone(),
            name,
            preferred: false,
        })
        .collect())
}
