//! Root `index.html` that forwards visitors to the default version

use std::path::{Path, PathBuf};

use tracing::info;

use crate::site::config::SiteConfig;
use crate::site::error::SiteError;

/// The version the site root should open: the first preferred entry, else
/// the configured default
pub fn default_version(config: &SiteConfig) -> &str {
    config
        .versions
        .iter()
        .find(|v| v.preferred)
        .map(|v| v.version_name.as_str())
        .unwrap_or(&config.build.default_version)
}

/// Render the redirect page
pub fn render_root_redirect(version: &str, title: &str) -> String {
    let version = escape_html(version);
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="0; url={version}/">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            display: flex;
            align-items: center;
            justify-content: center;
            height: 100vh;
            margin: 0;
        }}
        .container {{
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <p>Redirecting to <a href="{version}/">{version}</a>...</p>
        <p><small>If not redirected, click the link above.</small></p>
    </div>
</body>
</html>
"#
    )
}

/// Write `index.html` into `dir`, returning its path
pub fn write_root_redirect(dir: &Path, version: &str, title: &str) -> Result<PathBuf, SiteError> {
    std::fs::create_dir_all(dir).map_err(|source| SiteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join("index.html");
    std::fs::write(&path, render_root_redirect(version, title)).map_err(|source| {
        SiteError::Io {
            path: path.clone(),
            source,
        }
    })?;

    info!("Created {} redirecting to {}/", path.display(), version);
    Ok(path)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
