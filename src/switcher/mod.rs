//! Client-side version switcher for multi-version documentation
//!
//! Detects the version of the current page from its URL path, loads the
//! published versions catalog, renders it into a banner with a selection
//! control and, on selection, navigates to the same page under the chosen
//! version.
//!
//! # Flow
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ detector │──▶│  loader  │──▶│  banner  │──▶│ rewriter │──▶ Page::navigate
//! │  (path)  │   │ (fetch)  │   │(populate)│   │ (select) │
//! └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`banner`]: Banner and select control model
//! - [`catalog`]: `versions.json` payload parsing
//! - [`controller`]: Per-page switcher state tying the other modules together
//! - [`detector`]: Version token detection in URL paths
//! - [`error`]: Catalog error types
//! - [`loader`]: Catalog source trait and HTTP implementation
//! - [`page`]: Capability interface to the hosting page
//! - [`rewriter`]: Destination path computation

pub mod banner;
pub mod catalog;
pub mod controller;
pub mod detector;
pub mod error;
pub mod loader;
pub mod page;
pub mod rewriter;

pub use catalog::{VersionCatalog, VersionDescriptor};
pub use controller::VersionSwitcher;
pub use error::CatalogError;
