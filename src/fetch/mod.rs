// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// Submodules:
// - http: A thin wrapper around one reused reqwest::Client that sends the
//   configured User-Agent and turns non-2xx answers into errors
// =============================================================================

mod http;

pub use http::{FetchedPage, PageFetcher};
