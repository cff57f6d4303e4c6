// src/store/naming.rs
// =============================================================================
// This module decides where a downloaded page lands on disk.
//
// Two policies, picked per run:
// - TitleBased: flat directory, file named after the sanitized <title>
// - PathBased: nested directories mirroring the URL path
//
// Title-based names can collide (two pages called "Overview"). The later
// page overwrites the earlier one; that is accepted behaviour.
// =============================================================================

use std::path::PathBuf;

use clap::ValueEnum;
use url::Url;

/// Longest file stem produced by title-based naming, in characters
pub const MAX_TITLE_LEN: usize = 50;

/// Stem used when there is nothing better (no title, empty path)
pub const FALLBACK_STEM: &str = "index";

/// How a stored page's file path is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingPolicy {
    /// `<output_dir>/<sanitized title>.html`
    #[value(name = "title")]
    TitleBased,
    /// `<output_dir>/<path segments...>.html`
    #[value(name = "path")]
    PathBased,
}

impl NamingPolicy {
    // Path of the file relative to the output directory
    pub fn relative_path(self, url: &Url, title: &str) -> PathBuf {
        match self {
            NamingPolicy::TitleBased => PathBuf::from(format!("{}.html", sanitize_title(title))),
            NamingPolicy::PathBased => path_keyed(url),
        }
    }
}

// Turns a page title into a safe file stem
//
// Keeps alphanumerics, '-' and '_'; every other char becomes '_'. Spaces
// survive the first pass, get trimmed at the ends, then become '_' too.
// The result is cut to MAX_TITLE_LEN characters.
//
// Example:
//   "Getting Started: Agents" -> "Getting_Started__Agents"
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem: String = replaced
        .trim()
        .replace(' ', "_")
        .chars()
        .take(MAX_TITLE_LEN)
        .collect();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

// "/a/b/c" -> a/b/c.html, "/" -> index.html, "/guide/" -> guide.html
fn path_keyed(url: &Url) -> PathBuf {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let mut path = PathBuf::new();
    match segments.split_last() {
        Some((last, dirs)) => {
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{last}.html"));
        }
        None => path.push(format!("{FALLBACK_STEM}.html")),
    }
    path
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why chars() and not bytes?
//    - Titles are often non-ASCII ("Über uns")
//    - Cutting at byte 50 could split a UTF-8 character in half
//    - take(MAX_TITLE_LEN) on chars() always cuts on a character boundary
//
// 2. What does split_last() do?
//    - Splits a slice into (last element, everything before it)
//    - Returns None for an empty slice, which is exactly our "index" case
// -----------------------------------------------------------------------------
