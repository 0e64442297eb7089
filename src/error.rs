//! Error types for the media scanner.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media scanner.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    // Catalog errors
    #[error("Duplicate {kind} path in catalog: {path}")]
    DuplicatePath { kind: &'static str, path: String },

    #[error("Catalog file is corrupt: {0}")]
    CatalogCorrupt(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a duplicate-path error for an entity kind.
    pub fn duplicate(kind: &'static str, path: &std::path::Path) -> Self {
        Error::DuplicatePath {
            kind,
            path: path.display().to_string(),
        }
    }

    /// Whether this error is a unique-path violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicatePath { .. })
    }
}
