// src/navigate/mod.rs
// =============================================================================
// This module downloads every page listed in a navigation menu.
//
// It is the alternative to crawling: instead of discovering pages, the page
// list comes straight from the site's own menu markup.
//
// Submodules:
// - download: NavDownloader (manifest, then sequential throttled downloads)
// =============================================================================

mod download;

pub use download::{DownloadReport, NavDownloader};
