//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Get file extension in lowercase, with the leading dot (".mkv").
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Get file extension as written on disk, with the leading dot.
///
/// Returns an empty string when the file has no extension.
pub fn raw_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// File name of a path as a string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension(&PathBuf::from("movie.MKV")), Some(".mkv".to_string()));
        assert_eq!(dotted_extension(&PathBuf::from("movie")), None);
        assert_eq!(dotted_extension(&PathBuf::from(".bashrc")), None);
    }

    #[test]
    fn test_raw_extension() {
        assert_eq!(raw_extension(&PathBuf::from("/m/Movie.MP4")), ".MP4");
        assert_eq!(raw_extension(&PathBuf::from("/m/Movie")), "");
    }

    #[test]
    fn test_ensure_directory() {
        assert!(ensure_directory(&PathBuf::from("/nonexistent/path")).is_err());
        assert!(ensure_directory(&std::env::temp_dir()).is_ok());
    }
}
