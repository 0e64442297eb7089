//! Catalog reconciliation.
//!
//! Brings the catalog in line with what is on disk without ever inserting a
//! path twice. Two independent flows run one after the other:
//!
//! 1. **Movies**: every video file under the movies root becomes a [`Media`]
//!    entry unless its path is already cataloged.
//! 2. **TV shows**: every directory directly under the TV root is a show;
//!    its seasons come from [`discover_seasons`] and every video file under a
//!    season directory becomes an [`Episode`].
//!
//! Existing rows are never updated or deleted. Failures are logged and the
//! offending item is skipped; an unreadable root only stops its own flow.

use super::normalizer::clean_title;
use super::parser::extract_episode_info;
use super::scanner::walk;
use super::seasons::{discover_seasons, SeasonDir};
use crate::models::media::{Episode, Media, MediaType, Season, TvShow};
use crate::services::catalog::Catalog;
use crate::utils::fs::{file_name, raw_extension};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Per-entity counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Items found on disk.
    pub discovered: usize,
    /// New catalog rows created.
    pub added: usize,
    /// Items already cataloged.
    pub skipped: usize,
    /// Items that could not be looked up or saved.
    pub failed: usize,
}

impl std::fmt::Display for ScanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} found, {} added, {} already known, {} failed",
            self.discovered, self.added, self.skipped, self.failed
        )
    }
}

/// Counters for the TV flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TvScanStats {
    /// Show directories under the TV root.
    pub shows: ScanStats,
    /// Season directories, implicit seasons included.
    pub seasons: ScanStats,
    /// Episode files across all seasons.
    pub episodes: ScanStats,
}

/// Outcome of a find-or-create step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Upsert {
    /// The path was already cataloged under this id.
    Existing(i64),
    /// A new row was created with this id.
    Created(i64),
}

impl Upsert {
    fn id(self) -> i64 {
        match self {
            Upsert::Existing(id) | Upsert::Created(id) => id,
        }
    }

    fn count(self, stats: &mut ScanStats) {
        match self {
            Upsert::Existing(_) => stats.skipped += 1,
            Upsert::Created(_) => stats.added += 1,
        }
    }
}

/// Scan both libraries into the catalog.
///
/// Runs the movies flow and then the TV flow. Nothing is returned; progress
/// and failures are reported through `tracing`.
pub fn scan_all(catalog: &dyn Catalog, movies_root: &Path, tv_root: &Path) {
    tracing::info!(
        "Starting media scan (movies: {}, tv: {})",
        movies_root.display(),
        tv_root.display()
    );

    match scan_movies(catalog, movies_root) {
        Ok(stats) => tracing::info!("Movies: {}", stats),
        Err(e) => tracing::error!("Scan failed for {}: {}", movies_root.display(), e),
    }

    match scan_tv_shows(catalog, tv_root) {
        Ok(stats) => {
            tracing::info!("TV shows: {}", stats.shows);
            tracing::info!("Seasons: {}", stats.seasons);
            tracing::info!("Episodes: {}", stats.episodes);
        }
        Err(e) => tracing::error!("Error reading TV directory {}: {}", tv_root.display(), e),
    }

    tracing::info!("Media scan complete");
}

/// Catalog every movie file under `movies_root`.
///
/// # Errors
/// Only when the walk of `movies_root` fails; per-file failures are logged
/// and counted.
pub fn scan_movies(catalog: &dyn Catalog, movies_root: &Path) -> Result<ScanStats> {
    let files = walk(movies_root)?;
    let mut stats = ScanStats {
        discovered: files.len(),
        ..Default::default()
    };

    for file in files {
        match catalog.find_media_by_path(&file.path) {
            Ok(Some(_)) => {
                tracing::debug!("Already cataloged: {}", file.path.display());
                stats.skipped += 1;
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to look up {}: {}", file.path.display(), e);
                stats.failed += 1;
                continue;
            }
        }

        let media = Media {
            id: 0,
            title: clean_title(&file.filename()),
            path: file.path.clone(),
            media_type: MediaType::Movie,
            size_bytes: file.size_bytes,
            file_extension: raw_extension(&file.path),
        };

        match catalog.save_media(&media) {
            Ok(id) => {
                tracing::debug!("Added movie #{} '{}'", id, media.title);
                stats.added += 1;
            }
            Err(e) => {
                tracing::warn!("Error saving media {}: {}", file.path.display(), e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// Catalog every show directory directly under `tv_root`.
///
/// # Errors
/// Only when `tv_root` cannot be listed; failures inside a show are logged
/// and counted.
pub fn scan_tv_shows(catalog: &dyn Catalog, tv_root: &Path) -> Result<TvScanStats> {
    let mut show_dirs: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(tv_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            show_dirs.push((entry.file_name().to_string_lossy().to_string(), entry.path()));
        }
    }
    show_dirs.sort();

    let mut stats = TvScanStats::default();
    stats.shows.discovered = show_dirs.len();

    for (title, show_path) in show_dirs {
        let show_id = match upsert_show(catalog, &title, &show_path) {
            Ok(upsert) => {
                upsert.count(&mut stats.shows);
                upsert.id()
            }
            Err(e) => {
                tracing::warn!("Error saving TV show {}: {}", show_path.display(), e);
                stats.shows.failed += 1;
                continue;
            }
        };

        scan_seasons(catalog, show_id, &show_path, &mut stats);
    }

    Ok(stats)
}

/// Find a show by path, creating it when absent.
fn upsert_show(catalog: &dyn Catalog, title: &str, path: &Path) -> Result<Upsert> {
    if let Some(existing) = catalog.find_tv_show_by_path(path)? {
        return Ok(Upsert::Existing(existing.id));
    }

    let show = TvShow {
        id: 0,
        title: title.to_string(),
        path: path.to_path_buf(),
    };
    let id = catalog.save_tv_show(&show)?;
    tracing::debug!("Added TV show #{} '{}'", id, title);
    Ok(Upsert::Created(id))
}

/// Find a season by path, creating it under `show_id` when absent.
fn upsert_season(catalog: &dyn Catalog, show_id: i64, season: &SeasonDir) -> Result<Upsert> {
    if let Some(existing) = catalog.find_season_by_path(&season.path)? {
        return Ok(Upsert::Existing(existing.id));
    }

    let record = Season {
        id: 0,
        show_id,
        number: season.number,
        title: season.title.clone(),
        path: season.path.clone(),
    };
    let id = catalog.save_season(&record)?;
    tracing::debug!(
        "Added season #{} ({}) for show #{}",
        id,
        season.title,
        show_id
    );
    Ok(Upsert::Created(id))
}

fn scan_seasons(catalog: &dyn Catalog, show_id: i64, show_path: &Path, stats: &mut TvScanStats) {
    let seasons = match discover_seasons(show_path) {
        Ok(seasons) => seasons,
        Err(e) => {
            tracing::warn!("Error reading TV show directory {}: {}", show_path.display(), e);
            return;
        }
    };
    stats.seasons.discovered += seasons.len();

    for season in seasons {
        let season_id = match upsert_season(catalog, show_id, &season) {
            Ok(upsert) => {
                upsert.count(&mut stats.seasons);
                upsert.id()
            }
            Err(e) => {
                tracing::warn!("Error saving season {}: {}", season.path.display(), e);
                stats.seasons.failed += 1;
                continue;
            }
        };

        if let Err(e) = scan_episodes(catalog, season_id, &season, &mut stats.episodes) {
            tracing::warn!("Error scanning season directory {}: {}", season.path.display(), e);
        }
    }
}

/// Catalog every video file under a season directory as an episode of
/// `season_id`.
fn scan_episodes(
    catalog: &dyn Catalog,
    season_id: i64,
    season: &SeasonDir,
    stats: &mut ScanStats,
) -> Result<()> {
    let files = walk(&season.path)?;
    stats.discovered += files.len();

    for file in files {
        match catalog.find_episode_by_path(&file.path) {
            Ok(Some(_)) => {
                stats.skipped += 1;
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to look up {}: {}", file.path.display(), e);
                stats.failed += 1;
                continue;
            }
        }

        let info = extract_episode_info(&file.path);
        if info.season_or(season.number) != season.number {
            tracing::debug!(
                "{} names season {} but lives in {}",
                file_name(&file.path),
                info.season_or(season.number),
                season.title
            );
        }

        let episode = Episode {
            id: 0,
            season_id,
            number: info.episode,
            title: info.title,
            path: file.path.clone(),
            size_bytes: file.size_bytes,
        };

        match catalog.save_episode(&episode) {
            Ok(id) => {
                tracing::debug!("Added episode #{} '{}'", id, episode.title);
                stats.added += 1;
            }
            Err(e) => {
                tracing::warn!("Error saving episode {}: {}", file.path.display(), e);
                stats.failed += 1;
            }
        }
    }

    Ok(())
}

/// Run [`scan_all`] on the blocking thread pool.
///
/// The handle may be dropped; the scan still runs to completion. Must be
/// called from within a tokio runtime.
pub fn spawn_scan(
    catalog: Arc<dyn Catalog>,
    movies_root: PathBuf,
    tv_root: PathBuf,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || scan_all(catalog.as_ref(), &movies_root, &tv_root))
}

/// Allows at most one background scan at a time.
pub struct ScanCoordinator {
    catalog: Arc<dyn Catalog>,
    running: Arc<AtomicBool>,
}

/// Clears the running flag when the scan task ends, even by panic.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ScanCoordinator {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a scan started by this coordinator is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start a background scan unless one is already running.
    ///
    /// Returns `None` when a scan is in flight.
    pub fn try_start(&self, movies_root: PathBuf, tv_root: PathBuf) -> Option<JoinHandle<()>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::info!("Scan already in progress, ignoring request");
            return None;
        }

        let guard = RunningGuard(Arc::clone(&self.running));
        let catalog = Arc::clone(&self.catalog);
        Some(tokio::task::spawn_blocking(move || {
            let _guard = guard;
            scan_all(catalog.as_ref(), &movies_root, &tv_root);
        }))
    }
}
