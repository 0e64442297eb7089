//! Media Scanner CLI
//!
//! A command-line tool that catalogs movie and TV show folders.

use clap::Parser;
use media_scanner::cli::{
    args::{Cli, Commands},
    commands::{list, scan},
};
use media_scanner::models::config;
use media_scanner::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let loaded = config::load_config();

    // Run the appropriate command
    match cli.command {
        Commands::Scan { movies, tv } => {
            let config = loaded.with_overrides(movies, tv, cli.catalog);

            // Run preflight checks unless skipped
            if !cli.skip_preflight {
                run_preflight_checks(&config)?;
            }

            scan::scan(&config).await?;
        }

        Commands::List { what } => {
            let config = loaded.with_overrides(None, None, cli.catalog);
            list::list(&config.catalog_path, what).await?;
        }

        Commands::Stats => {
            let config = loaded.with_overrides(None, None, cli.catalog);
            list::stats(&config.catalog_path).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_scanner=debug")
    } else {
        EnvFilter::new("media_scanner=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(config: &config::Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config);
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
