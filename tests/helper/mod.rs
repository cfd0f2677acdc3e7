//! Shared test utilities

pub mod catalog;

#[allow(unused_imports)]
pub use catalog::{StaticCatalogSource, serve_catalog};
