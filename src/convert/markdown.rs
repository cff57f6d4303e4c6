// src/convert/markdown.rs
// =============================================================================
// This module turns one stored HTML page into readable Markdown.
//
// Pipeline for a single document:
// 1. Parse leniently (html5ever never rejects input)
// 2. Detach boilerplate: navigation, sidebars, header, footer, script, style
// 3. Pick the main content region, trying selectors in priority order,
//    then <body>, then the raw input
// 4. Convert with html2md (links and tables survive, nothing is wrapped)
// 5. Clean up the Markdown
//
// Every step is deterministic, so converting the same file twice gives the
// same bytes.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Elements removed before conversion
const BOILERPLATE_SELECTORS: &str =
    "nav, .sidebar, #sidebar, .navigation, #navigation, header, footer, script, style";

/// Candidates for the main content region, best first
const MAIN_CONTENT_SELECTORS: [&str; 5] = ["main", ".main-content", "article", ".content", "#content"];

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

// A run of '#' at the start of a line glued to the heading text
static CRAMPED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)([^#\s])").expect("valid regex"));

// A '*' bullet at the start of a line glued to the item text. html2md writes
// emphasis as *text*, so a line with a closing '*' is not a bullet.
static CRAMPED_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*([^\s*][^*\n]*)$").expect("valid regex"));

/// Alt text given to images that have none
const DEFAULT_IMAGE_ALT: &str = "Image";

static MISSING_IMAGE_ALT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\]\(").expect("valid regex"));

// Converts a full HTML document to cleaned-up Markdown
pub fn html_to_markdown(html: &str) -> String {
    let content = main_content_html(html);
    clean_markdown(&html2md::parse_html(&content))
}

// Returns the HTML of the region worth converting, with boilerplate removed
pub fn main_content_html(html: &str) -> String {
    let mut document = Html::parse_document(html);
    strip_boilerplate(&mut document);

    for candidate in MAIN_CONTENT_SELECTORS {
        let selector = Selector::parse(candidate).expect("valid selector");
        if let Some(element) = document.select(&selector).next() {
            return element.html();
        }
    }

    let body = Selector::parse("body").expect("valid selector");
    match document.select(&body).next() {
        Some(element) => element.html(),
        None => html.to_string(),
    }
}

fn strip_boilerplate(document: &mut Html) {
    let selector = Selector::parse(BOILERPLATE_SELECTORS).expect("valid selector");

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

// Post-processes converted Markdown
//
// - 3+ consecutive newlines become exactly one blank line
// - "##Heading" becomes "## Heading"
// - "*item" becomes "* item" ("*Note*: ..." is emphasis and stays)
// - "![](a.png)" becomes "![Image](a.png)"
pub fn clean_markdown(markdown: &str) -> String {
    let text = EXCESS_BLANK_LINES.replace_all(markdown, "\n\n");
    let text = CRAMPED_HEADING.replace_all(&text, "${1} ${2}");
    let text = CRAMPED_BULLET.replace_all(&text, "* ${1}");
    let text = MISSING_IMAGE_ALT.replace_all(&text, format!("![{DEFAULT_IMAGE_ALT}](").as_str());
    text.into_owned()
}
