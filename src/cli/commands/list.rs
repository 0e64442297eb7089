//! List and stats command implementations.

use crate::cli::args::ListTarget;
use crate::models::media::MediaType;
use crate::services::JsonCatalog;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Print movies or shows from the catalog.
pub async fn list(catalog_path: &Path, what: ListTarget) -> Result<()> {
    let catalog = JsonCatalog::open(catalog_path)?;
    let store = catalog.memory();

    match what {
        ListTarget::Movies => {
            let mut movies = store.media_by_type(MediaType::Movie)?;
            movies.sort_by(|a, b| a.title.cmp(&b.title));

            println!("{}", format!("Movies ({})", movies.len()).bold().cyan());
            for movie in &movies {
                println!(
                    "  {} {} | {:.2} GB | {}",
                    format!("#{}", movie.id).dimmed(),
                    movie.title.bold(),
                    movie.size_bytes as f64 / 1_073_741_824.0,
                    movie.path.display()
                );
            }
        }
        ListTarget::Shows => {
            let shows = store.all_tv_shows()?;

            println!("{}", format!("TV Shows ({})", shows.len()).bold().cyan());
            for show in &shows {
                println!("  {} {}", format!("#{}", show.id).dimmed(), show.title.bold());
                for season in store.seasons_by_show(show.id)? {
                    let episodes = store.episodes_by_season(season.id)?;
                    println!("    {} ({} episodes)", season.title, episodes.len());
                    for episode in episodes {
                        println!("      E{:02} {}", episode.number, episode.title);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Show catalog statistics.
pub async fn stats(catalog_path: &Path) -> Result<()> {
    let catalog = JsonCatalog::open(catalog_path)?;
    let stats = catalog.memory().stats()?;

    println!("{}", "Media Catalog Statistics".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  Catalog: {}", catalog.path().display());
    println!("  Movies: {}", stats.movies);
    println!("  TV shows: {}", stats.tvshows);
    println!("  Seasons: {}", stats.seasons);
    println!("  Episodes: {}", stats.episodes);
    println!(
        "  Total size: {:.1} GB",
        stats.total_size_bytes as f64 / 1_073_741_824.0
    );

    Ok(())
}
