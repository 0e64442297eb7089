//! Catalog data structures shared by the catalog stores.

use super::media::{Episode, Media, MediaType, Season, TvShow};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full persisted catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Schema version
    pub version: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
    /// Movies
    #[serde(default)]
    pub media: Vec<Media>,
    /// TV shows
    #[serde(default)]
    pub tvshows: Vec<TvShow>,
    /// Seasons of all shows
    #[serde(default)]
    pub seasons: Vec<Season>,
    /// Episodes of all seasons
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            updated_at: chrono::Utc::now().to_rfc3339(),
            media: Vec::new(),
            tvshows: Vec::new(),
            seasons: Vec::new(),
            episodes: Vec::new(),
        }
    }
}

/// Entry counts for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub movies: usize,
    pub tvshows: usize,
    pub seasons: usize,
    pub episodes: usize,
    pub total_size_bytes: u64,
}

/// Next identifier for a table: one past the largest id in use.
fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i64) -> i64 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

impl CatalogData {
    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    pub fn media_by_path(&self, path: &Path) -> Option<&Media> {
        self.media.iter().find(|m| m.path == path)
    }

    pub fn tv_show_by_path(&self, path: &Path) -> Option<&TvShow> {
        self.tvshows.iter().find(|s| s.path == path)
    }

    pub fn season_by_path(&self, path: &Path) -> Option<&Season> {
        self.seasons.iter().find(|s| s.path == path)
    }

    pub fn episode_by_path(&self, path: &Path) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.path == path)
    }

    /// Insert a movie, rejecting a path that is already cataloged.
    pub fn insert_media(&mut self, media: &Media) -> Result<i64> {
        if self.media_by_path(&media.path).is_some() {
            return Err(Error::duplicate("media", &media.path));
        }
        let id = next_id(&self.media, |m| m.id);
        self.media.push(Media { id, ..media.clone() });
        self.touch();
        Ok(id)
    }

    /// Insert a TV show, rejecting a path that is already cataloged.
    pub fn insert_tv_show(&mut self, show: &TvShow) -> Result<i64> {
        if self.tv_show_by_path(&show.path).is_some() {
            return Err(Error::duplicate("tvshow", &show.path));
        }
        let id = next_id(&self.tvshows, |s| s.id);
        self.tvshows.push(TvShow { id, ..show.clone() });
        self.touch();
        Ok(id)
    }

    /// Insert a season, rejecting a path that is already cataloged.
    pub fn insert_season(&mut self, season: &Season) -> Result<i64> {
        if self.season_by_path(&season.path).is_some() {
            return Err(Error::duplicate("season", &season.path));
        }
        let id = next_id(&self.seasons, |s| s.id);
        self.seasons.push(Season { id, ..season.clone() });
        self.touch();
        Ok(id)
    }

    /// Insert an episode, rejecting a path that is already cataloged.
    pub fn insert_episode(&mut self, episode: &Episode) -> Result<i64> {
        if self.episode_by_path(&episode.path).is_some() {
            return Err(Error::duplicate("episode", &episode.path));
        }
        let id = next_id(&self.episodes, |e| e.id);
        self.episodes.push(Episode { id, ..episode.clone() });
        self.touch();
        Ok(id)
    }

    pub fn media_by_type(&self, media_type: MediaType) -> Vec<Media> {
        self.media
            .iter()
            .filter(|m| m.media_type == media_type)
            .cloned()
            .collect()
    }

    pub fn tv_show_by_id(&self, id: i64) -> Option<TvShow> {
        self.tvshows.iter().find(|s| s.id == id).cloned()
    }

    /// Seasons of a show, ordered by season number.
    pub fn seasons_by_show(&self, show_id: i64) -> Vec<Season> {
        let mut seasons: Vec<Season> = self
            .seasons
            .iter()
            .filter(|s| s.show_id == show_id)
            .cloned()
            .collect();
        seasons.sort_by_key(|s| s.number);
        seasons
    }

    /// Episodes of a season, ordered by episode number.
    pub fn episodes_by_season(&self, season_id: i64) -> Vec<Episode> {
        let mut episodes: Vec<Episode> = self
            .episodes
            .iter()
            .filter(|e| e.season_id == season_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| e.number);
        episodes
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            movies: self.media.len(),
            tvshows: self.tvshows.len(),
            seasons: self.seasons.len(),
            episodes: self.episodes.len(),
            total_size_bytes: self.media.iter().map(|m| m.size_bytes).sum::<u64>()
                + self.episodes.iter().map(|e| e.size_bytes).sum::<u64>(),
        }
    }
}
