//! Catalog persistence interface and the in-memory store.
//!
//! The scanner talks to storage only through [`Catalog`]. Lookups return
//! `Ok(None)` for "not cataloged yet"; saves return the new identifier and
//! reject a path that is already present with [`Error::DuplicatePath`].
//!
//! [`Error::DuplicatePath`]: crate::Error::DuplicatePath

use crate::models::catalog::{CatalogData, CatalogStats};
use crate::models::media::{Episode, Media, MediaType, Season, TvShow};
use crate::{Error, Result};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Persistence capability used by the reconciler.
pub trait Catalog: Send + Sync {
    fn find_media_by_path(&self, path: &Path) -> Result<Option<Media>>;
    fn save_media(&self, media: &Media) -> Result<i64>;

    fn find_tv_show_by_path(&self, path: &Path) -> Result<Option<TvShow>>;
    fn save_tv_show(&self, show: &TvShow) -> Result<i64>;

    fn find_season_by_path(&self, path: &Path) -> Result<Option<Season>>;
    fn save_season(&self, season: &Season) -> Result<i64>;

    fn find_episode_by_path(&self, path: &Path) -> Result<Option<Episode>>;
    fn save_episode(&self, episode: &Episode) -> Result<i64>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    data: Mutex<CatalogData>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing catalog data.
    pub fn from_data(data: CatalogData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CatalogData>> {
        self.data
            .lock()
            .map_err(|_| Error::other("catalog lock poisoned"))
    }

    /// Copy of the current catalog contents.
    pub fn snapshot(&self) -> Result<CatalogData> {
        Ok(self.lock()?.clone())
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        Ok(self.lock()?.stats())
    }

    pub fn media_by_type(&self, media_type: MediaType) -> Result<Vec<Media>> {
        Ok(self.lock()?.media_by_type(media_type))
    }

    pub fn all_tv_shows(&self) -> Result<Vec<TvShow>> {
        Ok(self.lock()?.tvshows.clone())
    }

    pub fn tv_show_by_id(&self, id: i64) -> Result<Option<TvShow>> {
        Ok(self.lock()?.tv_show_by_id(id))
    }

    pub fn seasons_by_show(&self, show_id: i64) -> Result<Vec<Season>> {
        Ok(self.lock()?.seasons_by_show(show_id))
    }

    pub fn episodes_by_season(&self, season_id: i64) -> Result<Vec<Episode>> {
        Ok(self.lock()?.episodes_by_season(season_id))
    }

    /// Apply a mutation to a copy of the data and keep it only if `commit`
    /// accepts the result. The lock is held throughout, so commits are
    /// serialized.
    pub(crate) fn mutate_and_commit<T>(
        &self,
        f: impl FnOnce(&mut CatalogData) -> Result<T>,
        commit: impl FnOnce(&CatalogData) -> Result<()>,
    ) -> Result<T> {
        let mut data = self.lock()?;
        let mut staged = data.clone();
        let value = f(&mut staged)?;
        commit(&staged)?;
        *data = staged;
        Ok(value)
    }
}

impl Catalog for MemoryCatalog {
    fn find_media_by_path(&self, path: &Path) -> Result<Option<Media>> {
        Ok(self.lock()?.media_by_path(path).cloned())
    }

    fn save_media(&self, media: &Media) -> Result<i64> {
        self.lock()?.insert_media(media)
    }

    fn find_tv_show_by_path(&self, path: &Path) -> Result<Option<TvShow>> {
        Ok(self.lock()?.tv_show_by_path(path).cloned())
    }

    fn save_tv_show(&self, show: &TvShow) -> Result<i64> {
        self.lock()?.insert_tv_show(show)
    }

    fn find_season_by_path(&self, path: &Path) -> Result<Option<Season>> {
        Ok(self.lock()?.season_by_path(path).cloned())
    }

    fn save_season(&self, season: &Season) -> Result<i64> {
        self.lock()?.insert_season(season)
    }

    fn find_episode_by_path(&self, path: &Path) -> Result<Option<Episode>> {
        Ok(self.lock()?.episode_by_path(path).cloned())
    }

    fn save_episode(&self, episode: &Episode) -> Result<i64> {
        self.lock()?.insert_episode(episode)
    }
}
