//! Episode filename parser.
//!
//! Recovers season number, episode number and episode title from release
//! style names using layered regex matchers:
//! - `S01E05`, `S01.E05`, `E05` (season defaults to 1 when only the
//!   episode is given)
//! - `1x05`
//! - `Season 1 Episode 5`, `Episode.5`
//!
//! Parsing is best-effort and never fails. Unrecognized names yield episode 0
//! and the cleaned filename as the title.

use super::normalizer::{clean_title, strip_extension, strip_release_noise};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

static SEASON_EPISODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^[:alnum:]])(?:s(\d+)[\s._-]*)?e(\d+)[\s._-]*(.*)$")
        .expect("season/episode regex should compile")
});

static CROSS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^[:alnum:]])(\d{1,2})x(\d{2,3})(?:[^[:alnum:]][\s._-]*(.*))?$")
        .expect("NxM regex should compile")
});

static EPISODE_WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:season[\s._-]*(\d+)[\s._-]*)?episode[\s._-]*(\d+)[\s._-]*(.*)$")
        .expect("episode word regex should compile")
});

/// Which matcher recognized the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeMatcher {
    /// `S01E05` or `E05`
    SeasonEpisode,
    /// `1x05`
    Cross,
    /// `Season 1 Episode 5` or `Episode 5`
    EpisodeWord,
    /// Nothing matched
    Unrecognized,
}

/// Episode information parsed from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    /// Season number, if the name carried one (or implied one).
    pub season: Option<u32>,
    /// Episode number, 0 when unknown.
    pub episode: u32,
    /// Episode title.
    pub title: String,
    /// Matcher that produced this result.
    pub matcher: EpisodeMatcher,
}

impl EpisodeInfo {
    /// Season number, or `default` when the name had none.
    pub fn season_or(&self, default: u32) -> u32 {
        self.season.unwrap_or(default)
    }
}

/// Parse a numeric capture; overflow and absence both give 0.
fn number(caps: &Captures<'_>, group: usize) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Build the title from the text after the episode marker.
fn episode_title(caps: &Captures<'_>, group: usize, filename: &str) -> String {
    let rest = caps.get(group).map(|m| m.as_str()).unwrap_or("");
    let title = strip_release_noise(rest);
    let title = title.trim_start_matches(|c: char| c == ' ' || c == '-');

    if title.is_empty() {
        clean_title(filename)
    } else {
        title.to_string()
    }
}

/// Extract season, episode and title from a file path.
///
/// Only the file name is considered; parent directories are ignored.
pub fn extract_episode_info(file_path: &Path) -> EpisodeInfo {
    let filename = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = strip_extension(&filename);

    if let Some(caps) = SEASON_EPISODE_PATTERN.captures(stem) {
        let season = if caps.get(1).is_some() {
            number(&caps, 1)
        } else {
            1
        };
        return EpisodeInfo {
            season: Some(season),
            episode: number(&caps, 2),
            title: episode_title(&caps, 3, &filename),
            matcher: EpisodeMatcher::SeasonEpisode,
        };
    }

    if let Some(caps) = CROSS_PATTERN.captures(stem) {
        return EpisodeInfo {
            season: Some(number(&caps, 1)),
            episode: number(&caps, 2),
            title: episode_title(&caps, 3, &filename),
            matcher: EpisodeMatcher::Cross,
        };
    }

    if let Some(caps) = EPISODE_WORD_PATTERN.captures(stem) {
        return EpisodeInfo {
            season: caps.get(1).map(|_| number(&caps, 1)),
            episode: number(&caps, 2),
            title: episode_title(&caps, 3, &filename),
            matcher: EpisodeMatcher::EpisodeWord,
        };
    }

    tracing::debug!("No episode pattern in {}", filename);
    EpisodeInfo {
        season: None,
        episode: 0,
        title: clean_title(&filename),
        matcher: EpisodeMatcher::Unrecognized,
    }
}
