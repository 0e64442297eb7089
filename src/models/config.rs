//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory holding movie files.
    pub movies_dir: PathBuf,
    /// Root directory holding one folder per TV show.
    pub tv_dir: PathBuf,
    /// Catalog JSON file.
    pub catalog_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies_dir: env_path("MOVIES_DIR", "./media/movies"),
            tv_dir: env_path("TV_DIR", "./media/tv"),
            catalog_path: dirs_config_path().join("catalog.json"),
        }
    }
}

impl Config {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        movies_dir: Option<PathBuf>,
        tv_dir: Option<PathBuf>,
        catalog_path: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = movies_dir {
            self.movies_dir = dir;
        }
        if let Some(dir) = tv_dir {
            self.tv_dir = dir;
        }
        if let Some(path) = catalog_path {
            self.catalog_path = path;
        }
        self
    }
}

fn env_path(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback))
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_scanner")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e)
                }
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(r#"movies_dir = "/srv/movies""#).unwrap();
        assert_eq!(config.movies_dir, PathBuf::from("/srv/movies"));
        assert!(config.catalog_path.ends_with("catalog.json"));
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let config = Config {
            movies_dir: PathBuf::from("/a"),
            tv_dir: PathBuf::from("/b"),
            catalog_path: PathBuf::from("/c.json"),
        }
        .with_overrides(None, Some(PathBuf::from("/tv")), None);

        assert_eq!(config.movies_dir, PathBuf::from("/a"));
        assert_eq!(config.tv_dir, PathBuf::from("/tv"));
        assert_eq!(config.catalog_path, PathBuf::from("/c.json"));
    }
}
