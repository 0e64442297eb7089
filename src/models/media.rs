//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    TvShow,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::TvShow => write!(f, "tvshow"),
        }
    }
}

/// A video file found on disk.
///
/// Produced by the directory walker and consumed once by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Path to the file, rooted at the walked directory.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl MediaFile {
    /// File name without path.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A cataloged movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Catalog identifier (0 until saved).
    #[serde(default)]
    pub id: i64,
    /// Cleaned title.
    pub title: String,
    /// Full path to the file. Unique within the catalog.
    pub path: PathBuf,
    /// Media type.
    pub media_type: MediaType,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Extension including the leading dot (e.g. ".mkv").
    pub file_extension: String,
}

/// A cataloged TV show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvShow {
    #[serde(default)]
    pub id: i64,
    /// Show directory name.
    pub title: String,
    /// Show directory path. Unique within the catalog.
    pub path: PathBuf,
}

/// A cataloged season of a TV show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub id: i64,
    /// Owning show.
    pub show_id: i64,
    /// Season number.
    pub number: u32,
    /// Display title ("Season 2").
    pub title: String,
    /// Season directory path, or the show directory for an implicit season.
    pub path: PathBuf,
}

/// A cataloged episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub id: i64,
    /// Owning season.
    pub season_id: i64,
    /// Episode number (0 when unknown).
    pub number: u32,
    /// Episode title.
    pub title: String,
    /// Full path to the file. Unique within the catalog.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}
