// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-origin and path-prefix scoping (never leaves the docs section)
// - Hard ceiling on the number of pages fetched
// - Every fetched page is saved through the ContentStore
//
// Submodules:
// - scope: ScopeFilter, derived from the seed
// - frontier: FIFO queue plus visited set
// - queue: the Crawler that drives fetch -> save -> extract -> enqueue
// =============================================================================

mod frontier;
mod queue;
mod scope;

// Re-export the crawler and its summary
pub use queue::{CrawlReport, Crawler};
