//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Scanner - Catalog your movie and TV show folders
#[derive(Parser, Debug)]
#[command(name = "media-scanner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Catalog file (default: from config)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the movie and TV folders into the catalog
    Scan {
        /// Movies root directory (default: from config or MOVIES_DIR)
        #[arg(long, value_name = "DIR")]
        movies: Option<PathBuf>,

        /// TV shows root directory (default: from config or TV_DIR)
        #[arg(long, value_name = "DIR")]
        tv: Option<PathBuf>,
    },

    /// List catalog contents
    List {
        #[command(subcommand)]
        what: ListTarget,
    },

    /// Show catalog statistics
    Stats,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ListTarget {
    /// List movies
    Movies,

    /// List TV shows with their seasons and episodes
    Shows,
}
