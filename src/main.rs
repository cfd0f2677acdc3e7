use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use docs_version_switcher::config::{SwitcherConfig, log_path};
use docs_version_switcher::logging;
use docs_version_switcher::site::config::SiteConfig;
use docs_version_switcher::site::manifest::{
    generate_manifest, render_manifest, scan_built_versions, write_manifest,
};
use docs_version_switcher::site::matrix::{GitHubTagSource, collect_matrix};
use docs_version_switcher::site::redirect::{default_version, write_root_redirect};
use docs_version_switcher::switcher::detector::detect_version;
use docs_version_switcher::switcher::loader::{CatalogSource, HttpCatalogSource};
use docs_version_switcher::switcher::page::{Landmark, StaticPage};
use docs_version_switcher::switcher::rewriter::destination;
use docs_version_switcher::switcher::VersionSwitcher;

#[derive(Parser)]
#[command(name = "docs-version-switcher")]
#[command(version, about = "Version switching for multi-version documentation sites")]
struct Cli {
    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Also write JSON logs to the default log file in the data directory
    #[arg(long, global = true, conflicts_with = "log_file")]
    log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version token of a URL path
    Detect { path: String },

    /// Print the URL of the same page under another version
    Switch {
        /// Absolute URL of the current page
        url: String,
        /// Target version token
        #[arg(long)]
        to: String,
    },

    /// Fetch and print the versions catalog of a site
    Catalog {
        /// Site origin, e.g. https://docs.example.org
        origin: String,
        /// Print the parsed catalog as JSON
        #[arg(long)]
        json: bool,
        /// Switcher configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run the switcher against a live site on a headless page
    Simulate {
        /// Absolute URL of the page
        url: String,
        /// Version to pick from the dropdown
        #[arg(long)]
        select: Option<String>,
        /// Switcher configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write versions.json from versions.yaml
    Manifest {
        #[arg(long, default_value = "versions.yaml")]
        config: PathBuf,
        /// Output directory (the site root)
        #[arg(long)]
        out: PathBuf,
    },

    /// List built version directories as a versions.json catalog
    Scan {
        #[arg(default_value = "_build/html")]
        root: PathBuf,
        /// Write versions.json into this directory instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the root index.html redirecting to the default version
    Redirect {
        #[arg(long, default_value = "versions.yaml")]
        config: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "Documentation")]
        title: String,
    },

    /// Print the build matrix (latest branch plus newest release tags) as JSON
    Matrix {
        /// GitHub repository, "owner/name"
        repo: String,
        /// How many recent tags to include
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Branch to use for the "latest" snapshot
        #[arg(long, default_value = "main")]
        latest_branch: String,
        /// GitHub API token (defaults to $GITHUB_TOKEN)
        #[arg(long)]
        github_token: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().or_else(|| cli.log.then(log_path));
    let _guard = logging::init(log_file.as_deref());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Detect { path } => {
            match detect_version(&path) {
                Some(version) => println!("{}", version),
                None => println!("(none)"),
            }
            Ok(())
        }

        Command::Switch { url, to } => {
            let url = reqwest::Url::parse(&url).with_context(|| format!("invalid URL {}", url))?;
            println!("{}", switch_message(&url, &to));
            Ok(())
        }

        Command::Catalog {
            origin,
            json,
            config,
        } => {
            let config = load_switcher_config(config)?;
            let source = HttpCatalogSource::with_path(&origin, &config.versions_path);
            let catalog = source
                .fetch_catalog()
                .await
                .with_context(|| format!("failed to load {}", source.url()))?;

            if json {
                let descriptors: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&descriptors)?);
            } else {
                for descriptor in catalog.iter() {
                    let marker = if descriptor.preferred { " *" } else { "" };
                    println!("{}\t{}{}", descriptor.version, descriptor.name, marker);
                }
            }
            Ok(())
        }

        Command::Simulate {
            url,
            select,
            config,
        } => {
            let config = load_switcher_config(config)?;
            let url = reqwest::Url::parse(&url).with_context(|| format!("invalid URL {}", url))?;
            let page = StaticPage::from_url(&url).with_landmark(Landmark::PrimaryNav);
            let source =
                HttpCatalogSource::with_path(&url.origin().ascii_serialization(), &config.versions_path);

            let mut switcher = VersionSwitcher::start(page, &source, &config).await;

            let banner = switcher.banner();
            println!(
                "{} (current: {})",
                banner.label,
                switcher.current_version().unwrap_or("none")
            );
            for option in &banner.select.options {
                let marker = if option.selected { ">" } else { " " };
                let disabled = if banner.select.disabled { " [disabled]" } else { "" };
                println!("{} {}\t{}{}", marker, option.value, option.label, disabled);
            }

            if let Some(version) = select {
                match switcher.select(&version) {
                    Some(target) => println!("navigate: {}", target),
                    None => println!("navigate: (no-op)"),
                }
            }
            Ok(())
        }

        Command::Manifest { config, out } => {
            let site = SiteConfig::load(&config)?;
            let path = write_manifest(&out, &generate_manifest(&site))?;
            println!("{}", path.display());
            Ok(())
        }

        Command::Scan { root, out } => {
            let entries = scan_built_versions(&root)?;
            match out {
                Some(dir) => println!("{}", write_manifest(&dir, &entries)?.display()),
                None => println!("{}", render_manifest(&entries)?),
            }
            Ok(())
        }

        Command::Redirect { config, out, title } => {
            let site = SiteConfig::load(&config)?;
            let path = write_root_redirect(&out, default_version(&site), &title)?;
            println!("{}", path.display());
            Ok(())
        }

        Command::Matrix {
            repo,
            count,
            latest_branch,
            github_token,
        } => {
            let token = github_token.or_else(|| std::env::var("GITHUB_TOKEN").ok());
            let source = GitHubTagSource::github()?.with_token(token);
            let matrix = collect_matrix(&source, &repo, &latest_branch, count).await;
            println!("{}", serde_json::to_string(&matrix)?);
            Ok(())
        }
    }
}

/// Destination for `switch`, or a no-op note when there is nowhere to go
fn switch_message(url: &reqwest::Url, to: &str) -> String {
    let origin = url.origin().ascii_serialization();
    let current = detect_version(url.path());

    match destination(&origin, url.path(), current.as_deref(), to) {
        Some(target) => target,
        None if to.is_empty() => format!("{} (no-op: empty target version)", url),
        None => format!("{} (no-op: already on {})", url, to),
    }
}

fn load_switcher_config(path: Option<PathBuf>) -> anyhow::Result<SwitcherConfig> {
    let Some(path) = path else {
        return Ok(SwitcherConfig::default());
    };
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> reqwest::Url {
        reqwest::Url::parse(s).unwrap()
    }

    #[test]
    fn switch_message_prints_destination() {
        assert_eq!(
            switch_message(&url("https://docs.example.org/v3.4.0/guide/"), "develop"),
            "https://docs.example.org/develop/guide/"
        );
    }

    #[test]
    fn switch_message_reports_empty_target_as_noop() {
        let message = switch_message(&url("https://docs.example.org/v3.4.0/guide/"), "");
        assert_eq!(
            message,
            "https://docs.example.org/v3.4.0/guide/ (no-op: empty target version)"
        );
        assert!(!message.contains("already on"));
    }

    #[test]
    fn switch_message_reports_current_version_as_noop() {
        assert_eq!(
            switch_message(&url("https://docs.example.org/develop/"), "develop"),
            "https://docs.example.org/develop/ (no-op: already on develop)"
        );
    }
}
