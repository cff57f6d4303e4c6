// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands, one per pipeline stage:
// - crawl:   breadth-first crawl from a seed URL
// - nav:     download every page linked from a navigation menu
// - convert: turn a directory of saved HTML into Markdown
//
// The raw arguments defined here are turned into validated config records
// (see config.rs) before anything runs.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_MAX_PAGES, DEFAULT_NAV_DELAY_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::store::NamingPolicy;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "doc-harvest",
    version,
    about = "Crawl a documentation site and convert its pages to Markdown",
    long_about = "doc-harvest downloads the pages of a documentation website, either by \
                  crawling from a seed URL or from a pasted navigation menu, and converts \
                  the saved HTML into clean Markdown files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// Settings shared by the two download commands
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a documentation site breadth-first and save every page
    ///
    /// Example: doc-harvest crawl https://docs.example.com/guide/ --max-pages 100
    Crawl {
        /// Where the crawl starts; only pages under this URL's path are followed
        seed_url: String,

        /// Directory the HTML files are written to
        #[arg(long, default_value = "docs_html")]
        output_dir: PathBuf,

        /// Stop after this many pages (failed fetches count)
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,

        /// Pause between requests, in seconds
        #[arg(long = "delay-secs", default_value_t = 0.0)]
        request_delay_seconds: f64,

        /// How saved files are named
        #[arg(long, value_enum, default_value_t = NamingPolicy::TitleBased)]
        naming: NamingPolicy,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Download every page linked from a navigation menu
    ///
    /// Example: doc-harvest nav nav.html --site-url https://docs.example.com
    Nav {
        /// File containing the menu's HTML ("-" reads stdin)
        nav_file: PathBuf,

        /// Site that relative menu links are resolved against
        #[arg(long)]
        site_url: String,

        /// Directory the HTML files (and page_list.json) are written to
        #[arg(long, default_value = "docs_html")]
        output_dir: PathBuf,

        /// Pause between requests, in seconds
        #[arg(long = "delay-secs", default_value_t = DEFAULT_NAV_DELAY_SECS)]
        request_delay_seconds: f64,

        /// How saved files are named
        #[arg(long, value_enum, default_value_t = NamingPolicy::PathBased)]
        naming: NamingPolicy,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Convert saved HTML pages to Markdown
    ///
    /// Example: doc-harvest convert --input-dir docs_html --output-dir docs_md
    Convert {
        /// Directory searched recursively for .html files
        #[arg(long, default_value = "docs_html")]
        input_dir: PathBuf,

        /// Directory the .md files are written to (mirrors the input tree)
        #[arg(long, default_value = "docs_md")]
        output_dir: PathBuf,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::parse_from(["doc-harvest", "crawl", "https://example.com/docs/"]);
        match cli.command {
            Commands::Crawl {
                seed_url,
                output_dir,
                max_pages,
                request_delay_seconds,
                naming,
                json,
                fetch,
            } => {
                assert_eq!(seed_url, "https://example.com/docs/");
                assert_eq!(output_dir, PathBuf::from("docs_html"));
                assert_eq!(max_pages, 50);
                assert_eq!(request_delay_seconds, 0.0);
                assert_eq!(naming, NamingPolicy::TitleBased);
                assert!(!json);
                assert_eq!(fetch.user_agent, DEFAULT_USER_AGENT);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_nav_defaults_and_naming_flag() {
        let cli = Cli::parse_from([
            "doc-harvest",
            "nav",
            "nav.html",
            "--site-url",
            "https://docs.example.com",
            "--naming",
            "title",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Nav {
                request_delay_seconds,
                naming,
                ..
            } => {
                assert_eq!(request_delay_seconds, 1.0);
                assert_eq!(naming, NamingPolicy::TitleBased);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_nav_requires_site_url() {
        let result = Cli::try_parse_from(["doc-harvest", "nav", "nav.html"]);
        assert!(result.is_err());
    }
}
