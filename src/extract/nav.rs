// src/extract/nav.rs
// =============================================================================
// This module reads the links out of a navigation menu.
//
// The navigation downloader skips discovery entirely: someone pastes the
// site's sidebar/menu markup into a file, and every internal link in it is a
// page to download. There is no scoping and no de-duplication here.
//
// A link counts as internal when it is either:
// - a relative reference ("/docs/intro", "guide.html", "")
// - an absolute URL on the same origin as the site
// Anything with another scheme (mailto:, javascript:) or another host is
// external. Fragment-only hrefs point back into the current page and are
// skipped.
// =============================================================================

use scraper::{Html, Selector};
use url::{ParseError, Url};

// Extracts internal links from navigation markup
//
// Parameters:
//   nav_html: markup of the menu (a fragment is fine, it need not be a full page)
//   site: the site the menu belongs to
//
// Returns: href values exactly as written, in document order
pub fn extract_nav_links(nav_html: &str, site: &Url) -> Vec<String> {
    let document = Html::parse_document(nav_html);
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.starts_with('#'))
        .filter(|href| is_internal(href, site))
        .map(|href| href.to_string())
        .collect()
}

fn is_internal(href: &str, site: &Url) -> bool {
    match Url::parse(href) {
        // Has a scheme: internal only if it points back at the same site
        Ok(absolute) => absolute.origin() == site.origin(),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
