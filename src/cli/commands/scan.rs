//! Scan command implementation.

use crate::core::reconciler;
use crate::models::catalog::CatalogStats;
use crate::models::config::Config;
use crate::services::JsonCatalog;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Scan both media roots into the catalog and print what changed.
pub async fn scan(config: &Config) -> Result<()> {
    println!("{}", "[SCAN] Scanning media folders...".bold().cyan());
    println!("  Movies: {}", config.movies_dir.display());
    println!("  TV shows: {}", config.tv_dir.display());
    println!("  Catalog: {}", config.catalog_path.display());
    println!();

    let catalog = Arc::new(
        JsonCatalog::open(&config.catalog_path)
            .with_context(|| format!("Failed to open catalog {}", config.catalog_path.display()))?,
    );
    let before = catalog.memory().stats()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Reconciling catalog...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let handle = reconciler::spawn_scan(
        catalog.clone(),
        config.movies_dir.clone(),
        config.tv_dir.clone(),
    );
    handle.await.context("Scan task failed")?;

    pb.finish_with_message("Scan complete");

    let after = catalog.memory().stats()?;
    print_summary(&before, &after);

    Ok(())
}

fn print_summary(before: &CatalogStats, after: &CatalogStats) {
    println!();
    println!("{}", "[SCAN] Complete!".bold().green());
    println!(
        "  Movies: {} (+{})",
        after.movies,
        after.movies.saturating_sub(before.movies)
    );
    println!(
        "  TV shows: {} (+{})",
        after.tvshows,
        after.tvshows.saturating_sub(before.tvshows)
    );
    println!(
        "  Seasons: {} (+{})",
        after.seasons,
        after.seasons.saturating_sub(before.seasons)
    );
    println!(
        "  Episodes: {} (+{})",
        after.episodes,
        after.episodes.saturating_sub(before.episodes)
    );
    println!(
        "  Total size: {:.2} GB",
        after.total_size_bytes as f64 / 1_073_741_824.0
    );
}
