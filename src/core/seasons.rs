//! Season directory discovery for TV show folders.

use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static SEASON_DIR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^[:alpha:]])(?:season|s)[\s._-]*(\d+)")
        .expect("season directory regex should compile")
});

/// A season found under a show directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonDir {
    /// Season number.
    pub number: u32,
    /// Display title ("Season 2").
    pub title: String,
    /// Directory holding the season's episodes.
    pub path: PathBuf,
    /// True for the synthesized season covering a show without season folders.
    pub implicit: bool,
}

impl SeasonDir {
    fn new(number: u32, path: PathBuf, implicit: bool) -> Self {
        Self {
            number,
            title: format!("Season {}", number),
            path,
            implicit,
        }
    }
}

/// Parse a season number from a directory name ("Season 2", "S02", "s.3").
///
/// Digits that overflow give season 0.
pub fn season_number(dir_name: &str) -> Option<u32> {
    SEASON_DIR_PATTERN
        .captures(dir_name)
        .map(|caps| caps[1].parse().unwrap_or(0))
}

/// Find the seasons of a show.
///
/// Every immediate subdirectory whose name looks like a season becomes one
/// [`SeasonDir`], in name order. When none does, the result is a single
/// implicit season 1 rooted at `show_dir` itself.
///
/// # Errors
/// Fails when `show_dir` cannot be read.
pub fn discover_seasons(show_dir: &Path) -> Result<Vec<SeasonDir>> {
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(show_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    subdirs.sort();

    let seasons: Vec<SeasonDir> = subdirs
        .iter()
        .filter_map(|name| {
            season_number(name).map(|number| SeasonDir::new(number, show_dir.join(name), false))
        })
        .collect();

    if seasons.is_empty() {
        tracing::debug!(
            "No season folders in {}, using implicit season 1",
            show_dir.display()
        );
        return Ok(vec![SeasonDir::new(1, show_dir.to_path_buf(), true)]);
    }

    Ok(seasons)
}
