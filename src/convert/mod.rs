// src/convert/mod.rs
// =============================================================================
// Offline HTML -> Markdown conversion of a stored page tree.
//
// Submodules:
// - markdown: single-document conversion (boilerplate removal, main content
//   selection, html2md, cleanup)
// - batch: tree discovery and per-file conversion with mirrored output paths
// =============================================================================

mod batch;
mod markdown;

pub use batch::{convert_all_blocking, ConvertReport};
