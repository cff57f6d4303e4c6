// src/extract/html.rs
// =============================================================================
// This module extracts links and the title from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup still produces a tree
//
// We also use the `url` crate to resolve relative hrefs the same way a
// browser would.
// =============================================================================

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

// Extracts every link target from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL the HTML was fetched from (for resolving relative links)
//
// Returns: absolute URLs in document order. Duplicates are kept and nothing
// is filtered by scheme or host; that is the scheduler's job.
//
// Example:
//   html = "<a href='intro'>Intro</a>"
//   page_url = "https://example.com/docs/"
//   result = ["https://example.com/docs/intro"]
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            // Without a base we can't resolve anything
            warn!(page_url, error = %e, "invalid page URL, skipping link extraction");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(&base, href))
        .collect()
}

// Returns the trimmed text of the first <title>, if it has any
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").expect("valid selector");

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

// Resolves a possibly-relative href against the page URL
//
// Url::join handles both cases: absolute hrefs replace the base, relative
// ones are resolved against it.
//
// Examples:
//   base = "https://example.com/docs/page"
//   href = "/blog" -> Some("https://example.com/blog")
//   href = "../about" -> Some("https://example.com/about")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "http://[::1" -> None (unparseable)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(|url| url.to_string())
}
