// src/config.rs
// =============================================================================
// Run configuration records.
//
// Each pipeline (crawl, nav, convert) gets one explicit record that is built
// from the CLI arguments and validated once, before any request is sent or
// any file is touched. The scheduler / downloader / converter receive the
// validated record at construction and never look at raw arguments.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::store::NamingPolicy;

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_NAV_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP settings shared by both download pipelines
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    pub fn new(user_agent: impl Into<String>, timeout_secs: u64) -> Result<Self, ConfigError> {
        let user_agent = user_agent.into();
        if user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Settings for a breadth-first crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts; also defines the origin and path prefix scope
    pub seed_url: Url,
    pub output_dir: PathBuf,
    /// Hard ceiling on pages fetched (failed fetches count too)
    pub max_pages: usize,
    /// Pause between consecutive requests
    pub request_delay: Duration,
    pub naming: NamingPolicy,
}

impl CrawlConfig {
    pub fn new(
        seed_url: &str,
        output_dir: impl Into<PathBuf>,
        max_pages: usize,
        request_delay_seconds: f64,
        naming: NamingPolicy,
    ) -> Result<Self, ConfigError> {
        if max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }

        Ok(Self {
            seed_url: parse_http_url(seed_url)?,
            output_dir: output_dir.into(),
            max_pages,
            request_delay: delay_from_secs(request_delay_seconds)?,
            naming,
        })
    }
}

/// Settings for downloading the pages listed in a navigation menu
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    /// Relative menu links are resolved against this URL
    pub site_url: Url,
    pub output_dir: PathBuf,
    pub request_delay: Duration,
    pub naming: NamingPolicy,
}

impl NavigationConfig {
    pub fn new(
        site_url: &str,
        output_dir: impl Into<PathBuf>,
        request_delay_seconds: f64,
        naming: NamingPolicy,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            site_url: parse_http_url(site_url)?,
            output_dir: output_dir.into(),
            request_delay: delay_from_secs(request_delay_seconds)?,
            naming,
        })
    }
}

/// Settings for the offline HTML -> Markdown pass
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ConvertConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let input_dir = input_dir.into();
        if !input_dir.is_dir() {
            return Err(ConfigError::MissingInputDir(input_dir));
        }

        Ok(Self {
            input_dir,
            output_dir: output_dir.into(),
        })
    }
}

fn parse_http_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    // Rejects negative, NaN, infinite and anything too large for a Duration
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDelay(secs))
}
