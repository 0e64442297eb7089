//! Catalog storage services.

pub mod catalog;
pub mod json_catalog;

pub use catalog::{Catalog, MemoryCatalog};
pub use json_catalog::JsonCatalog;
