// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing)
// 3. Build and validate the config record for the chosen subcommand
// 4. Run the pipeline and print its summary
// 5. Exit with proper code (0 = run completed, 2 = setup error)
//
// Individual pages that fail to download, save or convert never change the
// exit code; they are logged and listed in the summary.
// =============================================================================

mod cli;
mod config;
mod convert;
mod crawl;
mod error;
mod extract;
mod fetch;
mod navigate;
mod store;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, FetchArgs};
use config::{ConvertConfig, CrawlConfig, FetchConfig, NavigationConfig};
use convert::ConvertReport;
use crawl::{CrawlReport, Crawler};
use fetch::PageFetcher;
use navigate::{DownloadReport, NavDownloader};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // Only setup failures get here
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "doc_harvest=debug"
    } else {
        "doc_harvest=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
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
            let config = CrawlConfig::new(
                &seed_url,
                output_dir,
                max_pages,
                request_delay_seconds,
                naming,
            )?;
            let fetcher = build_fetcher(&fetch)?;

            println!("🔍 Crawling: {}", config.seed_url);
            println!("📊 Max pages: {}", config.max_pages);

            let report = Crawler::new(config, fetcher)
                .run()
                .await
                .context("crawl could not start")?;
            print_report(&report, json, print_crawl_summary)
        }

        Commands::Nav {
            nav_file,
            site_url,
            output_dir,
            request_delay_seconds,
            naming,
            json,
            fetch,
        } => {
            let config =
                NavigationConfig::new(&site_url, output_dir, request_delay_seconds, naming)?;
            let fetcher = build_fetcher(&fetch)?;
            let nav_html = read_nav_markup(&nav_file)?;

            println!("🧭 Downloading navigation pages from: {}", config.site_url);

            let report = NavDownloader::new(config, fetcher)
                .run(&nav_html)
                .await
                .context("navigation download could not start")?;
            print_report(&report, json, print_download_summary)
        }

        Commands::Convert {
            input_dir,
            output_dir,
            json,
        } => {
            let config = ConvertConfig::new(input_dir, output_dir)?;

            println!(
                "📝 Converting {} -> {}",
                config.input_dir.display(),
                config.output_dir.display()
            );

            let report = convert::convert_all_blocking(config).await?;
            print_report(&report, json, print_convert_summary)
        }
    }
}

fn build_fetcher(args: &FetchArgs) -> Result<PageFetcher> {
    let config = FetchConfig::new(args.user_agent.clone(), args.timeout_secs)?;
    Ok(PageFetcher::new(&config)?)
}

// Reads the navigation markup from a file, or stdin for "-"
fn read_nav_markup(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read navigation markup from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read navigation markup from {}", path.display()))
}

// Prints a run summary either as JSON or in human-readable form
fn print_report<T: Serialize>(report: &T, json: bool, human: fn(&T)) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        human(report);
    }
    Ok(())
}

fn print_crawl_summary(report: &CrawlReport) {
    println!();
    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", report.pages_fetched);
    println!("   ✅ Saved: {}", report.stored.len());
    println!("   ❌ Failed: {}", report.failed.len());
    if report.abandoned > 0 {
        println!("   ⏹️  Left in queue: {}", report.abandoned);
    }
    print_failures(&report.failed);
}

fn print_download_summary(report: &DownloadReport) {
    println!();
    println!("📊 Summary:");
    println!("   📋 Pages listed: {}", report.links.len());
    println!("   ✅ Saved: {}", report.stored.len());
    println!("   ❌ Failed: {}", report.failed.len());
    if let Some(manifest) = &report.manifest {
        println!("   🗂️  Page list: {}", manifest.display());
    }
    print_failures(&report.failed);
}

fn print_convert_summary(report: &ConvertReport) {
    println!();
    println!("📊 Summary:");
    println!("   📄 HTML files found: {}", report.discovered);
    println!("   ✅ Converted: {}", report.converted.len());
    println!("   ❌ Failed: {}", report.failed.len());
    for path in &report.failed {
        println!("      {}", path.display());
    }
}

fn print_failures(failed: &[String]) {
    for url in failed {
        // Truncate URL if too long for display
        let url_display = if url.chars().count() > 97 {
            format!("{}...", url.chars().take(97).collect::<String>())
        } else {
            url.clone()
        };
        println!("      {}", url_display);
    }
}
