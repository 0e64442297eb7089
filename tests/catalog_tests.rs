//! Integration tests for the JSON catalog store.
//!
//! Tests cover:
//! - Missing and corrupt catalog files
//! - Persistence across reopen
//! - Backup of the previous file
//! - Duplicate-path rejection

use media_scanner::core::reconciler::scan_all;
use media_scanner::models::media::{Episode, Media, MediaType, Season, TvShow};
use media_scanner::services::{Catalog, JsonCatalog};
use media_scanner::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn movie(path: &str) -> Media {
    Media {
        id: 0,
        title: "Heat".to_string(),
        path: PathBuf::from(path),
        media_type: MediaType::Movie,
        size_bytes: 700,
        file_extension: ".mkv".to_string(),
    }
}

#[test]
fn test_missing_file_opens_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");

    let catalog = JsonCatalog::open(&path).unwrap();

    assert_eq!(catalog.memory().stats().unwrap().movies, 0);
    assert!(!path.exists());
}

#[test]
fn test_corrupt_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, "{ not json").unwrap();

    let result = JsonCatalog::open(&path);

    assert!(matches!(result, Err(Error::CatalogCorrupt(_))));
}

#[test]
fn test_saved_entries_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("catalog.json");

    {
        let catalog = JsonCatalog::open(&path).unwrap();
        let show_id = catalog
            .save_tv_show(&TvShow {
                id: 0,
                title: "Show".to_string(),
                path: PathBuf::from("/tv/Show"),
            })
            .unwrap();
        let season_id = catalog
            .save_season(&Season {
                id: 0,
                show_id,
                number: 1,
                title: "Season 1".to_string(),
                path: PathBuf::from("/tv/Show/Season 1"),
            })
            .unwrap();
        catalog
            .save_episode(&Episode {
                id: 0,
                season_id,
                number: 4,
                title: "Pilot".to_string(),
                path: PathBuf::from("/tv/Show/Season 1/Show.S01E04.mkv"),
                size_bytes: 10,
            })
            .unwrap();
        catalog.save_media(&movie("/movies/Heat.1995.mkv")).unwrap();
    }

    assert!(path.exists());
    let reopened = JsonCatalog::open(&path).unwrap();
    let heat = reopened
        .find_media_by_path(&PathBuf::from("/movies/Heat.1995.mkv"))
        .unwrap()
        .unwrap();
    assert_eq!(heat.id, 1);
    assert_eq!(heat.title, "Heat");

    let season = reopened
        .find_season_by_path(&PathBuf::from("/tv/Show/Season 1"))
        .unwrap()
        .unwrap();
    let episodes = reopened.memory().episodes_by_season(season.id).unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].number, 4);
}

#[test]
fn test_first_write_backs_up_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let backup = temp_dir.path().join("catalog.json.backup");

    JsonCatalog::open(&path)
        .unwrap()
        .save_media(&movie("/movies/a.mkv"))
        .unwrap();
    assert!(!backup.exists());
    let before = fs::read_to_string(&path).unwrap();

    let catalog = JsonCatalog::open(&path).unwrap();
    catalog.save_media(&movie("/movies/b.mkv")).unwrap();
    catalog.save_media(&movie("/movies/c.mkv")).unwrap();

    assert_eq!(fs::read_to_string(&backup).unwrap(), before);
    assert_eq!(JsonCatalog::open(&path).unwrap().memory().stats().unwrap().movies, 3);
}

#[test]
fn test_duplicate_path_is_rejected_and_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let catalog = JsonCatalog::open(&path).unwrap();

    catalog.save_media(&movie("/movies/a.mkv")).unwrap();
    let err = catalog.save_media(&movie("/movies/a.mkv")).unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(JsonCatalog::open(&path).unwrap().memory().stats().unwrap().movies, 1);
}

#[test]
fn test_scan_into_json_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let movies = temp_dir.path().join("movies");
    let tv = temp_dir.path().join("tv");
    fs::create_dir_all(&movies).unwrap();
    fs::create_dir_all(tv.join("Show").join("Season 1")).unwrap();
    fs::write(movies.join("Heat.1995.1080p.BluRay.mkv"), "fake").unwrap();
    fs::write(tv.join("Show").join("Season 1").join("Show.S01E01.Pilot.mkv"), "fake").unwrap();
    let path = temp_dir.path().join("catalog.json");

    scan_all(&JsonCatalog::open(&path).unwrap(), &movies, &tv);

    let stats = JsonCatalog::open(&path).unwrap().memory().stats().unwrap();
    assert_eq!(stats.movies, 1);
    assert_eq!(stats.tvshows, 1);
    assert_eq!(stats.seasons, 1);
    assert_eq!(stats.episodes, 1);
    assert_eq!(stats.total_size_bytes, 8);
}

#[test]
fn test_failed_write_does_not_keep_entry() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let catalog = JsonCatalog::open(&path).unwrap();
    let heat = movie("/movies/Heat.1995.mkv");

    // A directory where the file should be makes every write fail.
    fs::create_dir(&path).unwrap();
    assert!(catalog.save_media(&heat).is_err());
    assert!(catalog.find_media_by_path(&heat.path).unwrap().is_none());
    assert_eq!(catalog.memory().stats().unwrap().movies, 0);

    fs::remove_dir(&path).unwrap();
    catalog.save_media(&movie("/movies/Other.mkv")).unwrap();

    let reopened = JsonCatalog::open(&path).unwrap();
    assert!(reopened.find_media_by_path(&heat.path).unwrap().is_none());
    assert_eq!(reopened.memory().stats().unwrap().movies, 1);
}

#[test]
fn test_failed_backup_is_retried() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let backup = temp_dir.path().join("catalog.json.backup");

    JsonCatalog::open(&path)
        .unwrap()
        .save_media(&movie("/movies/a.mkv"))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let catalog = JsonCatalog::open(&path).unwrap();
    fs::create_dir(&backup).unwrap();
    assert!(catalog.save_media(&movie("/movies/b.mkv")).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    fs::remove_dir(&backup).unwrap();
    catalog.save_media(&movie("/movies/b.mkv")).unwrap();

    assert_eq!(fs::read_to_string(&backup).unwrap(), before);
    assert_eq!(JsonCatalog::open(&path).unwrap().memory().stats().unwrap().movies, 2);
}
