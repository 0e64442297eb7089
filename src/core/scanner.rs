//! Directory scanner module.
//!
//! Recursively collects video files under a root directory.

use crate::models::media::MediaFile;
use crate::utils::fs::{dotted_extension, ensure_directory};
use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Supported video file extensions, lower-case with the leading dot.
const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v",
];

/// Check if an extension is a video format.
///
/// Expects a lower-cased extension including the dot (".mkv"); callers
/// lower-case before asking.
pub fn is_video_file(extension: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&extension)
}

/// Walk a directory tree and return every video file in it.
///
/// Entries are visited in file-name order at each level, so the result is
/// stable for a given tree. Returned paths are `root` joined with the
/// relative path of each file. Symlinks are not followed.
///
/// # Errors
/// Fails when `root` is missing or not a directory. Any error on an entry
/// below the root (unreadable subdirectory, vanished file) ends the walk and
/// is returned; files collected before it are discarded.
pub fn walk(root: &Path) -> Result<Vec<MediaFile>> {
    ensure_directory(root)?;

    let mut files = Vec::new();
    let mut total_files_scanned = 0usize;

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        total_files_scanned += 1;

        let is_video = dotted_extension(entry.path())
            .map(|ext| is_video_file(&ext))
            .unwrap_or(false);
        if !is_video {
            continue;
        }

        let metadata = entry.metadata()?;
        files.push(MediaFile {
            path: entry.path().to_path_buf(),
            size_bytes: metadata.len(),
        });
    }

    tracing::debug!(
        "Walked {}: {} files, {} videos",
        root.display(),
        total_files_scanned,
        files.len()
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        for ext in [".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v"] {
            assert!(is_video_file(ext), "{} should be a video", ext);
        }
        assert!(!is_video_file(".txt"));
        assert!(!is_video_file(".jpg"));
        assert!(!is_video_file(".srt"));
        assert!(!is_video_file(""));
    }

    #[test]
    fn test_is_video_file_expects_dot_and_lowercase() {
        assert!(!is_video_file("mkv"));
        assert!(!is_video_file(".MKV"));
    }

    // Integration tests for walk() live in tests/scanner_tests.rs
}
