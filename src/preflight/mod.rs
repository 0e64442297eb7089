//! Preflight checks module.
//!
//! Verifies the media roots and the catalog location before a scan. A missing
//! media root is only a warning, since the scan skips that library; a catalog
//! that cannot be written is a failure.

use crate::models::config::Config;
use colored::Colorize;
use std::path::Path;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub warning: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            warning: false,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn warn(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            warning: true,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            warning: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Check that a media root is a readable directory.
fn check_media_root(name: &str, path: &Path, env_var: &str) -> CheckResult {
    let hint = format!("Create the directory or set {}", env_var);
    if !path.exists() {
        return CheckResult::warn(name, &format!("{} not found", path.display()), &hint);
    }
    if !path.is_dir() {
        return CheckResult::warn(name, &format!("{} is not a directory", path.display()), &hint);
    }
    match std::fs::read_dir(path) {
        Ok(_) => CheckResult::ok(name, &path.display().to_string()),
        Err(e) => CheckResult::warn(
            name,
            &format!("{} is not readable: {}", path.display(), e),
            "Check directory permissions",
        ),
    }
}

/// Check that the catalog file's directory exists or can be created.
fn check_catalog(path: &Path) -> CheckResult {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return CheckResult::ok("catalog", &path.display().to_string()),
    };

    match std::fs::create_dir_all(parent) {
        Ok(()) if path.is_dir() => CheckResult::fail(
            "catalog",
            &format!("{} is a directory", path.display()),
            "Pass a file path with --catalog",
        ),
        Ok(()) => CheckResult::ok("catalog", &path.display().to_string()),
        Err(e) => CheckResult::fail(
            "catalog",
            &format!("cannot create {}: {}", parent.display(), e),
            "Pass a writable location with --catalog",
        ),
    }
}

/// Run all preflight checks.
pub fn run_preflight_checks(config: &Config) -> Vec<CheckResult> {
    vec![
        check_media_root("movies", &config.movies_dir, "MOVIES_DIR"),
        check_media_root("tv", &config.tv_dir, "TV_DIR"),
        check_catalog(&config.catalog_path),
    ]
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        let tag = if !result.success {
            "[FAIL]".red()
        } else if result.warning {
            "[WARN]".yellow()
        } else {
            "[OK]".green()
        };
        println!("{} {}: {}", tag, result.name.bold(), result.message);
        if let Some(ref hint) = result.hint {
            println!("  {} {}", "->".yellow(), hint);
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_media_root_is_a_warning() {
        let result = check_media_root("movies", Path::new("/nonexistent/movies"), "MOVIES_DIR");
        assert!(result.success);
        assert!(result.warning);
    }

    #[test]
    fn test_existing_media_root_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let result = check_media_root("tv", temp_dir.path(), "TV_DIR");
        assert!(result.success);
        assert!(!result.warning);
    }

    #[test]
    fn test_catalog_parent_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = temp_dir.path().join("nested").join("catalog.json");
        assert!(check_catalog(&catalog).success);
        assert!(catalog.parent().unwrap().is_dir());
    }

    #[test]
    fn test_catalog_pointing_at_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let results = vec![check_catalog(temp_dir.path())];
        assert!(!all_passed(&results));
    }
}
