//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code mapping
//! - [`NewUrlMapping`] - Input for creating a mapping

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
