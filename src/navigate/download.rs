// src/navigate/download.rs
// =============================================================================
// Sequential downloader for a fixed list of menu links.
//
// Steps:
// 1. Pull the internal links out of the navigation markup
// 2. Put the site root in front if the menu doesn't link to it
// 3. Write page_list.json with the full list
// 4. For each link: resolve against the site URL, fetch, save
// 5. Sleep the fixed delay before the next request
//
// No scoping, no visited set, no retry. A failed link is logged and the loop
// moves on.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::NavigationConfig;
use crate::extract::extract_nav_links;
use crate::fetch::PageFetcher;
use crate::store::{ContentStore, PageRecord};

// What a finished navigation run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    /// The list written to the manifest, in download order
    pub links: Vec<String>,
    pub manifest: Option<PathBuf>,
    pub stored: Vec<PathBuf>,
    pub failed: Vec<String>,
}

pub struct NavDownloader {
    config: NavigationConfig,
    fetcher: PageFetcher,
    store: ContentStore,
}

impl NavDownloader {
    pub fn new(config: NavigationConfig, fetcher: PageFetcher) -> Self {
        let store = ContentStore::new(config.output_dir.clone(), config.naming);
        Self {
            config,
            fetcher,
            store,
        }
    }

    // The links a run over `nav_html` would download, root first if missing
    pub fn page_list(&self, nav_html: &str) -> Vec<String> {
        let mut links = extract_nav_links(nav_html, &self.config.site_url);

        if !links.iter().any(|link| self.is_site_root(link)) {
            links.insert(0, "/".to_string());
        }

        links
    }

    // "", "/", "./" and "https://<site>/" all name the site root
    fn is_site_root(&self, link: &str) -> bool {
        link.is_empty()
            || self
                .config
                .site_url
                .join(link)
                .is_ok_and(|url| url.path() == "/")
    }

    // Downloads every page in the menu
    //
    // Returns: a DownloadReport. Only failing to create the output directory
    // is an error.
    pub async fn run(&self, nav_html: &str) -> anyhow::Result<DownloadReport> {
        self.store.ensure_root().await?;

        let mut report = DownloadReport {
            links: self.page_list(nav_html),
            ..Default::default()
        };

        info!("found {} pages to download", report.links.len());

        match self.store.write_manifest(&report.links).await {
            Ok(path) => {
                info!(path = %path.display(), "wrote page list");
                report.manifest = Some(path);
            }
            Err(e) => warn!("could not write page list: {e}"),
        }

        let total = report.links.len();
        for (i, link) in report.links.iter().enumerate() {
            if i > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            info!("[{}/{}] processing link: {}", i + 1, total, link);

            let url = match self.config.site_url.join(link) {
                Ok(url) => url,
                Err(e) => {
                    warn!(link = %link, "cannot resolve link: {e}");
                    report.failed.push(link.clone());
                    continue;
                }
            };

            let page = match self.fetcher.fetch(url.as_str()).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("{e}");
                    report.failed.push(url.to_string());
                    continue;
                }
            };

            let record = PageRecord::from_fetched(url, page);
            match self.store.save(&record).await {
                Ok(path) => report.stored.push(path),
                Err(e) => {
                    warn!(url = %record.url, "could not save page: {e}");
                    report.failed.push(record.url.to_string());
                }
            }
        }

        info!(
            stored = report.stored.len(),
            failed = report.failed.len(),
            "download completed"
        );
        Ok(report)
    }
}
