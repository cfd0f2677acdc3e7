//! Capability interface to the hosting page
//!
//! The switcher never touches a document directly: reading the location,
//! inserting the banner, re-rendering the select and navigating all go
//! through [`Page`]. A browser host implements it over the live DOM;
//! [`StaticPage`] is the headless implementation used by the CLI and tests.

use crate::switcher::banner::{Banner, SelectControl};

/// Document loading state, as reported by `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Page elements the banner can be anchored after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// The primary navigation bar
    PrimaryNav,
    /// A generic page header
    Header,
}

/// Where the banner ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPoint {
    AfterPrimaryNav,
    AfterHeader,
    BodyTop,
}

#[async_trait::async_trait]
pub trait Page: Send + Sync {
    /// Path component of the current location (e.g. "/v3.4.0/docs/install")
    fn pathname(&self) -> String;

    /// Scheme, host and port of the current location, without trailing slash
    fn origin(&self) -> String;

    fn ready_state(&self) -> ReadyState;

    /// Resolves once the document has been parsed.
    ///
    /// Only awaited while [`Page::ready_state`] is `Loading`.
    async fn dom_content_loaded(&self) {}

    /// Whether an element with this id already exists
    fn contains_element(&self, id: &str) -> bool;

    fn has_landmark(&self, landmark: Landmark) -> bool;

    fn insert_banner(&mut self, at: MountPoint, banner: &Banner);

    /// Re-render the options of the mounted select control
    fn render_select(&mut self, select: &SelectControl);

    /// Full top-level navigation to `url`
    fn navigate(&mut self, url: &str);
}

/// Pick the banner position: after the primary navigation, else after the
/// header, else at the top of the body
pub fn mount_point<P: Page + ?Sized>(page: &P) -> MountPoint {
    if page.has_landmark(Landmark::PrimaryNav) {
        MountPoint::AfterPrimaryNav
    } else if page.has_landmark(Landmark::Header) {
        MountPoint::AfterHeader
    } else {
        MountPoint::BodyTop
    }
}

/// A banner inserted into a [`StaticPage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBanner {
    pub at: MountPoint,
    pub banner: Banner,
}

/// In-memory page with a fixed location and landmark set.
///
/// Records every mutation so that callers can inspect what a browser would
/// have displayed and where it would have navigated.
#[derive(Debug, Clone)]
pub struct StaticPage {
    origin: String,
    pathname: String,
    ready_state: ReadyState,
    landmarks: Vec<Landmark>,
    banners: Vec<MountedBanner>,
    navigations: Vec<String>,
}

impl StaticPage {
    pub fn new(origin: impl Into<String>, pathname: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            pathname: pathname.into(),
            ready_state: ReadyState::Complete,
            landmarks: Vec::new(),
            banners: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// Build a page from an absolute URL
    pub fn from_url(url: &reqwest::Url) -> Self {
        Self::new(url.origin().ascii_serialization(), url.path())
    }

    pub fn with_landmark(mut self, landmark: Landmark) -> Self {
        if !self.landmarks.contains(&landmark) {
            self.landmarks.push(landmark);
        }
        self
    }

    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    pub fn banners(&self) -> &[MountedBanner] {
        &self.banners
    }

    /// The select control as currently rendered, if a banner is mounted
    pub fn select(&self) -> Option<&SelectControl> {
        self.banners.first().map(|mounted| &mounted.banner.select)
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

#[async_trait::async_trait]
impl Page for StaticPage {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn contains_element(&self, id: &str) -> bool {
        self.banners
            .iter()
            .any(|mounted| mounted.banner.id == id || mounted.banner.select.id == id)
    }

    fn has_landmark(&self, landmark: Landmark) -> bool {
        self.landmarks.contains(&landmark)
    }

    fn insert_banner(&mut self, at: MountPoint, banner: &Banner) {
        self.banners.push(MountedBanner {
            at,
            banner: banner.clone(),
        });
    }

    fn render_select(&mut self, select: &SelectControl) {
        if let Some(mounted) = self
            .banners
            .iter_mut()
            .find(|mounted| mounted.banner.select.id == select.id)
        {
            mounted.banner.select = select.clone();
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BannerLabels;
    use rstest::rstest;

    #[rstest]
    #[case(&[Landmark::PrimaryNav, Landmark::Header], MountPoint::AfterPrimaryNav)]
    #[case(&[Landmark::PrimaryNav], MountPoint::AfterPrimaryNav)]
    #[case(&[Landmark::Header], MountPoint::AfterHeader)]
    #[case(&[], MountPoint::BodyTop)]
    fn mount_point_prefers_nav_then_header_then_body(
        #[case] landmarks: &[Landmark],
        #[case] expected: MountPoint,
    ) {
        let page = landmarks
            .iter()
            .fold(StaticPage::new("https://docs.example.org", "/"), |page, l| {
                page.with_landmark(*l)
            });

        assert_eq!(mount_point(&page), expected);
    }

    #[test]
    fn from_url_splits_origin_and_path() {
        let url = reqwest::Url::parse("http://localhost:8000/v1.0/docs/index.html?x=1").unwrap();
        let page = StaticPage::from_url(&url);

        assert_eq!(page.origin(), "http://localhost:8000");
        assert_eq!(page.pathname(), "/v1.0/docs/index.html");
    }

    #[test]
    fn render_select_updates_mounted_control() {
        let labels = BannerLabels::default();
        let mut page = StaticPage::new("https://docs.example.org", "/");
        let banner = Banner::new(&labels);
        page.insert_banner(MountPoint::BodyTop, &banner);

        let mut select = banner.select.clone();
        select.mark_unavailable(&labels);
        page.render_select(&select);

        assert!(page.select().unwrap().disabled);
        assert!(page.contains_element("version-banner"));
        assert!(page.contains_element("version-select"));
    }
}
