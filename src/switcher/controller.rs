//! Version switcher bound to a single page load

use tracing::{debug, error, info, warn};

use crate::config::{BANNER_ID, BannerLabels, SwitcherConfig};
use crate::switcher::banner::Banner;
use crate::switcher::catalog::VersionCatalog;
use crate::switcher::detector::detect_version;
use crate::switcher::error::CatalogError;
use crate::switcher::loader::CatalogSource;
use crate::switcher::page::{Page, ReadyState, mount_point};
use crate::switcher::rewriter::destination;

/// Insert the banner unless the page already has one.
///
/// Returns whether a banner was inserted.
pub fn mount_banner<P: Page + ?Sized>(page: &mut P, banner: &Banner) -> bool {
    if page.contains_element(BANNER_ID) {
        return false;
    }
    let at = mount_point(&*page);
    page.insert_banner(at, banner);
    true
}

/// State of the switcher for one page load.
///
/// Created when the page is ready and dropped with it; nothing is shared
/// across pages.
pub struct VersionSwitcher<P: Page> {
    page: P,
    labels: BannerLabels,
    banner: Banner,
    current_version: Option<String>,
    catalog: Option<VersionCatalog>,
}

impl<P: Page> VersionSwitcher<P> {
    /// Mount the banner (at most once per page) and detect the current version
    pub fn mount(mut page: P, config: &SwitcherConfig) -> Self {
        let banner = Banner::new(&config.labels);
        mount_banner(&mut page, &banner);

        let current_version = detect_version(&page.pathname());
        info!("Current version: {:?}", current_version);

        Self {
            page,
            labels: config.labels.clone(),
            banner,
            current_version,
            catalog: None,
        }
    }

    /// Wait for the document, mount, then load the catalog.
    ///
    /// Catalog failures leave the control in its unavailable state and are
    /// only logged.
    pub async fn start(page: P, source: &dyn CatalogSource, config: &SwitcherConfig) -> Self {
        if page.ready_state() == ReadyState::Loading {
            page.dom_content_loaded().await;
        }

        let mut switcher = Self::mount(page, config);
        let _ = switcher.load(source).await;
        switcher
    }

    /// Fetch the catalog and populate the control.
    ///
    /// On failure the control is degraded before the error is returned, so
    /// callers may ignore it.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<usize, CatalogError> {
        match source.fetch_catalog().await {
            Ok(catalog) => {
                self.banner
                    .select
                    .populate(&catalog, self.current_version.as_deref());
                self.page.render_select(&self.banner.select);

                let count = catalog.len();
                info!("Loaded {} versions", count);
                self.catalog = Some(catalog);
                Ok(count)
            }
            Err(e) => {
                if e.is_unavailable() {
                    warn!("Versions catalog unavailable: {}", e);
                } else {
                    error!("Versions catalog rejected: {}", e);
                }
                self.banner.select.mark_unavailable(&self.labels);
                self.page.render_select(&self.banner.select);
                Err(e)
            }
        }
    }

    /// Handle a change of the selection control.
    ///
    /// Navigates to the equivalent page under `version` and returns the
    /// destination. Selecting the current version, an empty value, any value
    /// while the control is disabled, or, once the catalog is loaded, a value
    /// it does not list does nothing.
    pub fn select(&mut self, version: &str) -> Option<String> {
        if self.banner.select.disabled {
            return None;
        }

        let listed = self
            .catalog
            .as_ref()
            .is_none_or(|catalog| catalog.contains(version));
        if !version.is_empty() && !listed {
            debug!("Ignoring version {:?} missing from the catalog", version);
            return None;
        }

        let url = destination(
            &self.page.origin(),
            &self.page.pathname(),
            self.current_version.as_deref(),
            version,
        )?;

        info!("Switching to: {}", url);
        self.page.navigate(&url);
        Some(url)
    }

    pub fn current_version(&self) -> Option<&str> {
        self.current_version.as_deref()
    }

    pub fn catalog(&self) -> Option<&VersionCatalog> {
        self.catalog.as_ref()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }
}
