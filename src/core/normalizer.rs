//! Release-name title normalizer.
//!
//! Turns names like `Movie.2020.1080p.BluRay.x264-GRP.mkv` into `Movie` by
//! running an ordered table of noise rules over the file stem. Rules overlap,
//! so the order of [`NOISE_RULES`] is part of the behavior: resolution tags go
//! before generic bracket groups, and the bare year goes last.

use once_cell::sync::Lazy;
use regex::Regex;

/// A single named removal pattern.
#[derive(Debug)]
pub struct NoiseRule {
    /// Short identifier, used in tests and debug logs.
    pub name: &'static str,
    /// Case-insensitive pattern; every match is replaced with "".
    pub pattern: Regex,
}

impl NoiseRule {
    /// Apply this rule to `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, "").into_owned()
    }
}

/// Rule name of the trailing `.GroupName` rule, which episode titles skip.
pub const TRAILING_DOT_GROUP: &str = "trailing_dot_group";

const RULE_SOURCES: &[(&str, &str)] = &[
    ("bracketed_resolution", r"(?i)\s*\[\s*\d{3,4}p\s*\]"),
    ("parenthesized_resolution", r"(?i)\s*\(\s*\d{3,4}p\s*\)"),
    ("dash_resolution", r"(?i)\s*-\s*\d{3,4}p"),
    ("bare_resolution", r"(?i)\s*\d{3,4}p"),
    ("bracketed_hd", r"(?i)\s*\[\s*HD\s*\]"),
    ("parenthesized_hd", r"(?i)\s*\(\s*HD\s*\)"),
    ("bluray", r"(?i)\s*BluRay"),
    ("web_dl", r"(?i)\s*WEB-DL"),
    ("webrip", r"(?i)\s*WEBRip"),
    ("hdrip", r"(?i)\s*HDRip"),
    ("bdrip", r"(?i)\s*BDRip"),
    ("dvdrip", r"(?i)\s*DVDRip"),
    ("x264", r"(?i)\s*x264"),
    ("x265", r"(?i)\s*x265"),
    ("hevc", r"(?i)\s*HEVC"),
    ("aac", r"(?i)\s*AAC"),
    ("ac3", r"(?i)\s*AC3"),
    ("dts", r"(?i)\s*DTS"),
    ("yify", r"(?i)\s*YIFY"),
    ("rarbg", r"(?i)\s*RARBG"),
    ("dash_rarbg", r"(?i)\s*-RARBG"),
    ("bracketed_group", r"(?i)\s*\[[^\]]+\]"),
    ("parenthesized_group", r"(?i)\s*\([^\)]+\)"),
    ("trailing_dash_group", r"(?i)\s*-\s*[^-\s]+$"),
    (TRAILING_DOT_GROUP, r"(?i)\s*\.\s*[^.\s]+$"),
    ("year", r"(?i)\s*\d{4}"),
];

/// The ordered noise rules applied by [`clean_title`].
pub static NOISE_RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    RULE_SOURCES
        .iter()
        .map(|&(name, source)| NoiseRule {
            name,
            pattern: Regex::new(source).expect("noise rule regex should compile"),
        })
        .collect()
});

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static NoiseRule> {
    NOISE_RULES.iter().find(|r| r.name == name)
}

/// Strip the extension: everything from the final `.` on.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}

fn apply_rules<'a>(text: &str, rules: impl Iterator<Item = &'a NoiseRule>) -> String {
    rules.fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Replace separators with spaces and trim the result.
fn finish(text: &str) -> String {
    let spaced = text.replace(['.', '_'], " ");
    spaced
        .trim()
        .trim_end_matches(|c: char| c == ' ' || c == '-')
        .to_string()
}

/// Clean a raw filename into a human-readable title.
///
/// Dotfiles such as `.bashrc` are returned unchanged. An empty result is
/// possible when the whole name is noise.
pub fn clean_title(filename: &str) -> String {
    if let Some(rest) = filename.strip_prefix('.') {
        if !rest.contains('.') {
            return filename.to_string();
        }
    }

    let stem = strip_extension(filename);
    finish(&apply_rules(stem, NOISE_RULES.iter()))
}

/// Remove release noise from a fragment that has no extension.
///
/// Same pipeline as [`clean_title`] minus the trailing `.GroupName` rule, so
/// the last dot-separated word of an episode title survives.
pub fn strip_release_noise(text: &str) -> String {
    let rules = NOISE_RULES.iter().filter(|r| r.name != TRAILING_DOT_GROUP);
    finish(&apply_rules(text, rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, text: &str) -> String {
        rule(name).unwrap().apply(text)
    }

    #[test]
    fn test_all_rules_compile_in_order() {
        let names: Vec<&str> = NOISE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), RULE_SOURCES.len());
        assert_eq!(names.first(), Some(&"bracketed_resolution"));
        assert_eq!(names.last(), Some(&"year"));
    }

    #[test]
    fn test_resolution_rules() {
        assert_eq!(apply("bracketed_resolution", "Movie [1080p]"), "Movie");
        assert_eq!(apply("parenthesized_resolution", "Movie ( 720p )"), "Movie");
        assert_eq!(apply("dash_resolution", "Movie - 2160p"), "Movie");
        assert_eq!(apply("bare_resolution", "Movie.480P"), "Movie.");
    }

    #[test]
    fn test_hd_rules() {
        assert_eq!(apply("bracketed_hd", "Movie [HD]"), "Movie");
        assert_eq!(apply("parenthesized_hd", "Movie (hd)"), "Movie");
    }

    #[test]
    fn test_token_rules_are_case_insensitive() {
        assert_eq!(apply("bluray", "Movie.bluray"), "Movie.");
        assert_eq!(apply("web_dl", "Movie.web-dl.mkv"), "Movie..mkv");
        assert_eq!(apply("x265", "Movie X265"), "Movie");
        assert_eq!(apply("rarbg", "Movie-RARBG"), "Movie-");
    }

    #[test]
    fn test_group_rules() {
        assert_eq!(apply("bracketed_group", "Movie [Extended Cut]"), "Movie");
        assert_eq!(apply("parenthesized_group", "Movie (2019)"), "Movie");
        assert_eq!(apply("trailing_dash_group", "Movie-GRP"), "Movie");
        assert_eq!(apply("trailing_dash_group", "Show - Episode Title"), "Show - Episode Title");
        assert_eq!(apply(TRAILING_DOT_GROUP, "Movie.GRP"), "Movie");
        assert_eq!(apply("year", "Movie 2020"), "Movie");
    }

    #[test]
    fn test_clean_title_examples() {
        assert_eq!(clean_title("Movie.2020.1080p.BluRay.x264.mp4"), "Movie");
        assert_eq!(clean_title("Another Movie (2019) [1080p].mkv"), "Another Movie");
        assert_eq!(clean_title("Movie (HD).mp4"), "Movie");
        assert_eq!(clean_title("Movie_With_Underscores.mp4"), "Movie With Underscores");
        assert_eq!(
            clean_title("Movie.2020.1080p.WEB-DL.AAC.x264-RARBG.mp4"),
            "Movie"
        );
        assert_eq!(
            clean_title("TV Show S01E01 - Episode Title.mp4"),
            "TV Show S01E01 - Episode Title"
        );
    }

    #[test]
    fn test_clean_title_drops_trailing_dot_word() {
        assert_eq!(clean_title("Movie.With.Dots.mp4"), "Movie With");
    }

    #[test]
    fn test_clean_title_dotfile_unchanged() {
        assert_eq!(clean_title(".bashrc"), ".bashrc");
        assert_eq!(clean_title(".gitignore"), ".gitignore");
    }

    #[test]
    fn test_clean_title_without_extension() {
        assert_eq!(clean_title("Heat"), "Heat");
    }

    #[test]
    fn test_clean_title_may_be_empty() {
        assert_eq!(clean_title("1080p.mkv"), "");
    }

    #[test]
    fn test_clean_title_is_idempotent_for_clean_names() {
        for name in ["Another Movie", "Movie", "The Long Title Here", "Arrival"] {
            let once = clean_title(&format!("{}.mp4", name));
            let twice = clean_title(&format!("{}.mp4", once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_strip_release_noise_keeps_last_word() {
        assert_eq!(strip_release_noise("Episode.Title"), "Episode Title");
        assert_eq!(strip_release_noise("Pilot.720p.WEB-DL.x264-GRP"), "Pilot");
    }
}
