//! Media Scanner Library
//!
//! Scans movie and TV show folders, derives clean titles and episode numbers
//! from release-style filenames, and reconciles them into a catalog without
//! duplicates.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
