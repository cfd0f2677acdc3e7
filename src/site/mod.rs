//! Site-side tooling that produces what the switcher consumes
//!
//! # Modules
//!
//! - [`config`]: `versions.yaml` loading and validation
//! - [`error`]: Error types for site generation and tag listing
//! - [`manifest`]: `versions.json` generation and built-tree scanning
//! - [`matrix`]: Build matrix from upstream release tags
//! - [`redirect`]: Root `index.html` redirecting to the default version

pub mod config;
pub mod error;
pub mod manifest;
pub mod matrix;
pub mod redirect;
