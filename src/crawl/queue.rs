// src/crawl/queue.rs
// =============================================================================
// This module drives a breadth-first crawl of a documentation site.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Pop the next URL, count it against max_pages, fetch it
// 3. On success: save the page, extract its links, offer each to the frontier
// 4. On failure: log it and move on (the page still used up its slot)
// 5. Stop when the frontier is empty or max_pages is reached
//
// Everything is sequential: one request in flight, each awaited before the
// next begins. An optional fixed delay sits between requests.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::frontier::Frontier;
use crate::config::CrawlConfig;
use crate::extract::extract_links;
use crate::fetch::PageFetcher;
use crate::store::{ContentStore, PageRecord};

// What a finished crawl did
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Pages requested, successful or not (never more than max_pages)
    pub pages_fetched: usize,
    /// Files written, in crawl order
    pub stored: Vec<PathBuf>,
    /// URLs whose fetch or save failed
    pub failed: Vec<String>,
    /// Queued URLs left behind when the page ceiling was hit
    pub abandoned: usize,
}

// A breadth-first crawler over one site section
pub struct Crawler {
    config: CrawlConfig,
    fetcher: PageFetcher,
    store: ContentStore,
}

impl Crawler {
    pub fn new(config: CrawlConfig, fetcher: PageFetcher) -> Self {
        let store = ContentStore::new(config.output_dir.clone(), config.naming);
        Self {
            config,
            fetcher,
            store,
        }
    }

    // Runs the crawl to completion
    //
    // Returns: a CrawlReport. The only error is failing to create the output
    // directory; per-page problems are logged and recorded in the report.
    pub async fn run(&self) -> anyhow::Result<CrawlReport> {
        self.store.ensure_root().await?;

        let mut frontier = Frontier::new(self.config.seed_url.clone());
        let mut report = CrawlReport::default();

        info!(
            seed = %self.config.seed_url,
            prefix = frontier.scope().path_prefix(),
            max_pages = self.config.max_pages,
            "starting crawl"
        );

        while report.pages_fetched < self.config.max_pages {
            let Some(url) = frontier.dequeue() else {
                break;
            };

            // Polite crawling: fixed pause between requests (not before the first)
            if report.pages_fetched > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            report.pages_fetched += 1;
            info!(
                "[{}/{}] processing {}",
                report.pages_fetched, self.config.max_pages, url
            );

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

            let mut enqueued = 0;
            for link in extract_links(&record.html, record.url.as_str()) {
                if frontier.offer(&link) {
                    enqueued += 1;
                } else {
                    debug!(link = %link, "dropped");
                }
            }
            debug!(url = %record.url, enqueued, "links queued");
        }

        report.abandoned = frontier.pending_count();
        if report.abandoned > 0 {
            info!(
                abandoned = report.abandoned,
                "page limit reached, leaving remaining URLs unvisited"
            );
        }

        info!(
            pages = report.pages_fetched,
            visited = frontier.visited_count(),
            "crawl completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::store::NamingPolicy;
    use mockito::{Server, ServerGuard};
    use std::time::{Duration, Instant};

    fn crawler(server: &ServerGuard, out: &std::path::Path, max_pages: usize) -> Crawler {
        throttled_crawler(server, out, max_pages, 0.0)
    }

    fn throttled_crawler(
        server: &ServerGuard,
        out: &std::path::Path,
        max_pages: usize,
        delay: f64,
    ) -> Crawler {
        let config = CrawlConfig::new(
            &format!("{}/docs/", server.url()),
            out,
            max_pages,
            delay,
            NamingPolicy::PathBased,
        )
        .unwrap();
        let fetcher = PageFetcher::new(&FetchConfig::default()).unwrap();
        Crawler::new(config, fetcher)
    }

    #[tokio::test]
    async fn test_crawl_follows_only_in_scope_links() {
        let mut server = Server::new_async().await;
        let seed_body = format!(
            r#"<html><head><title>Docs</title></head><body>
                <a href="intro">Intro</a>
                <a href="/blog/x">Blog</a>
                <a href="https://other.com/docs/y">Other</a>
                <a href="intro#section">Section</a>
                <a href="{}/docs/intro">Intro again</a>
            </body></html>"#,
            server.url()
        );
        let seed = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_body(seed_body)
            .expect(1)
            .create_async()
            .await;
        let intro = server
            .mock("GET", "/docs/intro")
            .with_status(200)
            .with_body(r#"<title>Intro</title><a href="/docs/">Back</a>"#)
            .expect(1)
            .create_async()
            .await;
        let blog = server
            .mock("GET", "/blog/x")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = crawler(&server, dir.path(), 50).run().await.unwrap();

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.abandoned, 0);
        assert!(report.failed.is_empty());
        assert_eq!(
            report.stored,
            vec![
                dir.path().join("docs.html"),
                dir.path().join("docs").join("intro.html"),
            ]
        );
        seed.assert_async().await;
        intro.assert_async().await;
        blog.assert_async().await;
    }

    #[tokio::test]
    async fn test_max_pages_is_a_hard_stop() {
        let mut server = Server::new_async().await;
        let seed = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_body(r#"<a href="a">A</a><a href="b">B</a><a href="c">C</a>"#)
            .expect(1)
            .create_async()
            .await;
        let others = server
            .mock("GET", mockito::Matcher::Regex(r"^/docs/[abc]$".to_string()))
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = crawler(&server, dir.path(), 1).run().await.unwrap();

        assert_eq!(report.pages_fetched, 1);
        assert_eq!(report.stored.len(), 1);
        assert_eq!(report.abandoned, 3);
        seed.assert_async().await;
        others.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_fetch_uses_a_slot_and_adds_no_links() {
        let mut server = Server::new_async().await;
        let _seed = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_body(r#"<a href="broken">Broken</a><a href="ok">OK</a>"#)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/docs/broken")
            .with_status(500)
            .with_body(r#"<a href="hidden">never followed</a>"#)
            .create_async()
            .await;
        let _ok = server
            .mock("GET", "/docs/ok")
            .with_status(200)
            .with_body("<title>OK</title>")
            .create_async()
            .await;
        let hidden = server
            .mock("GET", "/docs/hidden")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = crawler(&server, dir.path(), 50).run().await.unwrap();

        assert_eq!(report.pages_fetched, 3);
        assert_eq!(report.stored.len(), 2);
        assert_eq!(report.failed, vec![format!("{}/docs/broken", server.url())]);
        hidden.assert_async().await;
    }

    #[tokio::test]
    async fn test_title_naming_writes_flat_files() {
        let mut server = Server::new_async().await;
        let _seed = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_body("<title>Welcome: Docs</title>")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = CrawlConfig::new(
            &format!("{}/docs/", server.url()),
            dir.path(),
            5,
            0.0,
            NamingPolicy::TitleBased,
        )
        .unwrap();
        let fetcher = PageFetcher::new(&FetchConfig::default()).unwrap();
        let report = Crawler::new(config, fetcher).run().await.unwrap();

        assert_eq!(report.stored, vec![dir.path().join("Welcome__Docs.html")]);
    }

    #[tokio::test]
    async fn test_fixed_delay_between_requests() {
        let mut server = Server::new_async().await;
        let _seed = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_body(r#"<a href="next">Next</a>"#)
            .create_async()
            .await;
        let _next = server
            .mock("GET", "/docs/next")
            .with_status(200)
            .with_body("<title>Next</title>")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let started = Instant::now();
        let report = throttled_crawler(&server, dir.path(), 50, 0.1)
            .run()
            .await
            .unwrap();

        // Two requests, one pause
        assert_eq!(report.pages_fetched, 2);
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
