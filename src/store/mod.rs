// src/store/mod.rs
// =============================================================================
// This module persists downloaded pages.
//
// Submodules:
// - naming: NamingPolicy (title-keyed or path-keyed file names)
//
// ContentStore writes raw HTML under an output directory, creating any
// directories it needs, and writes the page list manifest for navigation
// runs. Directory creation is idempotent, so saving the same page twice is
// harmless (the second write simply replaces the first).
// =============================================================================

mod naming;

pub use naming::NamingPolicy;

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::error::WriteError;
use crate::extract::extract_title;
use crate::fetch::FetchedPage;

/// File name of the manifest written by navigation runs
pub const MANIFEST_FILE: &str = "page_list.json";

// One fetched page, alive only between download and save
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub url: Url,
    pub html: String,
    /// Text of <title>, or "index" if the page has none
    pub title: String,
}

impl PageRecord {
    pub fn new(url: Url, html: String) -> Self {
        let title = extract_title(&html).unwrap_or_else(|| "index".to_string());
        Self { url, html, title }
    }

    // Builds a record from a fetch result, using `url` as the page address
    pub fn from_fetched(url: Url, page: FetchedPage) -> Self {
        if let Some(content_type) = page.content_type.as_deref() {
            if !content_type.contains("html") {
                debug!(%url, content_type, "not declared as HTML, storing as markup anyway");
            }
        }
        Self::new(url, page.body)
    }
}

// Writes pages into one output directory according to a NamingPolicy
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    naming: NamingPolicy,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, naming: NamingPolicy) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }

    // Creates the output directory itself
    //
    // Callers treat failure here as fatal: if the root can't exist, no page
    // can be saved.
    pub async fn ensure_root(&self) -> Result<(), WriteError> {
        create_dir_all(&self.root).await
    }

    // Where `page` would be written
    pub fn path_for(&self, page: &PageRecord) -> PathBuf {
        self.root.join(self.naming.relative_path(&page.url, &page.title))
    }

    // Saves the page's HTML and returns the path written
    pub async fn save(&self, page: &PageRecord) -> Result<PathBuf, WriteError> {
        let path = self.path_for(page);

        if let Some(parent) = path.parent() {
            create_dir_all(parent).await?;
        }

        fs::write(&path, page.html.as_bytes())
            .await
            .map_err(|source| WriteError::Write {
                path: path.clone(),
                source,
            })?;

        info!(url = %page.url, path = %path.display(), "saved page");
        Ok(path)
    }

    // Writes the list of links as a pretty JSON array into the output root
    pub async fn write_manifest(&self, links: &[String]) -> Result<PathBuf, WriteError> {
        create_dir_all(&self.root).await?;

        let path = self.root.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(links)?;

        fs::write(&path, json)
            .await
            .map_err(|source| WriteError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

async fn create_dir_all(path: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| WriteError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}
