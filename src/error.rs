// src/error.rs
// =============================================================================
// Error types for every stage of the pipeline.
//
// Only ConfigError (and failing to create an output root) stops a run.
// Everything else is recovered: the caller logs it and moves on to the next
// page or file.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// A page could not be downloaded
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client itself could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (DNS, connect, timeout, body read, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Saving a page (or the manifest) to disk failed
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize page list: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Converting one stored HTML file to Markdown failed
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not inside input directory {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// A run configuration was rejected before any work started
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("max_pages must be at least 1")]
    ZeroMaxPages,

    #[error("request delay must be a finite, non-negative number of seconds (got {0})")]
    InvalidDelay(f64),

    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("user agent must not be empty")]
    EmptyUserAgent,

    #[error("input directory {0} does not exist")]
    MissingInputDir(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::ZeroMaxPages.to_string(),
            "max_pages must be at least 1"
        );
        assert_eq!(
            ConfigError::UnsupportedScheme("ftp://x".into()).to_string(),
            "URL 'ftp://x' must use http or https"
        );
    }

    #[test]
    fn test_write_error_names_path() {
        let err = WriteError::Write {
            path: PathBuf::from("out/page.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/page.html"));
    }
}
