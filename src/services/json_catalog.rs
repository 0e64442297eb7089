//! Catalog stored as a single JSON file.

use super::catalog::{Catalog, MemoryCatalog};
use crate::models::catalog::CatalogData;
use crate::models::media::{Episode, Media, Season, TvShow};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// File-backed catalog.
///
/// The whole catalog is loaded on open and rewritten after every successful
/// save. The first write of a session copies the previous file to
/// `<name>.json.backup`.
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    memory: MemoryCatalog,
    backed_up: AtomicBool,
}

/// Load catalog data from a JSON file. A missing file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<CatalogData> {
    if !path.exists() {
        return Ok(CatalogData::default());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::CatalogCorrupt(format!("{}: {}", path.display(), e)))
}

/// Write catalog data to a JSON file, creating parent directories.
pub fn write_catalog(data: &CatalogData, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(data)?;
    fs::write(path, content)?;
    Ok(())
}

impl JsonCatalog {
    /// Open the catalog at `path`, loading it if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = load_catalog(&path)?;
        tracing::debug!(
            "Opened catalog {} ({} movies, {} shows, {} episodes)",
            path.display(),
            data.media.len(),
            data.tvshows.len(),
            data.episodes.len()
        );
        Ok(Self {
            path,
            memory: MemoryCatalog::from_data(data),
            backed_up: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the loaded catalog.
    pub fn memory(&self) -> &MemoryCatalog {
        &self.memory
    }

    fn persist(&self, data: &CatalogData) -> Result<()> {
        if self.path.exists() && !self.backed_up.load(Ordering::SeqCst) {
            let backup_path = self.path.with_extension("json.backup");
            fs::copy(&self.path, &backup_path)?;
            self.backed_up.store(true, Ordering::SeqCst);
        }
        write_catalog(data, &self.path)
    }

    /// Apply an insert and write the file; the in-memory catalog only
    /// changes when the write succeeds.
    fn save_with(&self, f: impl FnOnce(&mut CatalogData) -> Result<i64>) -> Result<i64> {
        self.memory.mutate_and_commit(f, |data| self.persist(data))
    }
}

impl Catalog for JsonCatalog {
    fn find_media_by_path(&self, path: &Path) -> Result<Option<Media>> {
        self.memory.find_media_by_path(path)
    }

    fn save_media(&self, media: &Media) -> Result<i64> {
        self.save_with(|data| data.insert_media(media))
    }

    fn find_tv_show_by_path(&self, path: &Path) -> Result<Option<TvShow>> {
        self.memory.find_tv_show_by_path(path)
    }

    fn save_tv_show(&self, show: &TvShow) -> Result<i64> {
        self.save_with(|data| data.insert_tv_show(show))
    }

    fn find_season_by_path(&self, path: &Path) -> Result<Option<Season>> {
        self.memory.find_season_by_path(path)
    }

    fn save_season(&self, season: &Season) -> Result<i64> {
        self.save_with(|data| data.insert_season(season))
    }

    fn find_episode_by_path(&self, path: &Path) -> Result<Option<Episode>> {
        self.memory.find_episode_by_path(path)
    }

    fn save_episode(&self, episode: &Episode) -> Result<i64> {
        self.save_with(|data| data.insert_episode(episode))
    }
}

// File round-trip tests live in tests/catalog_tests.rs
