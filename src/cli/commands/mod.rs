//! CLI command implementations.

pub mod list;
pub mod scan;
