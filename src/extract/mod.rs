// src/extract/mod.rs
// =============================================================================
// This module pulls information out of fetched HTML.
//
// Submodules:
// - html: Page-level extraction (every anchor target, the page title)
// - nav: Internal links from a pasted navigation menu
//
// All parsing goes through scraper/html5ever, which recovers from any
// malformed input instead of failing. None of these functions return an
// error: a page with nothing recoverable simply yields nothing.
// =============================================================================

mod html;
mod nav;

pub use html::{extract_links, extract_title};
pub use nav::extract_nav_links;
