//! Core scanning logic.

pub mod normalizer;
pub mod parser;
pub mod reconciler;
pub mod scanner;
pub mod seasons;
