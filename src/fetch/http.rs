// src/fetch/http.rs
// =============================================================================
// This module performs the HTTP GET for a single page.
//
// Key functionality:
// - One reqwest::Client per run (connection pooling, shared settings)
// - Fixed browser-like User-Agent on every request
// - Non-2xx responses are errors; the body is only read on success
//
// There is no retry here. A failed page is reported to the caller, which
// logs it and carries on with the rest of the run.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::FetchError;

// The raw result of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body decoded as text
    pub body: String,
    /// Content-Type header, if the server sent one. We treat every body as
    /// markup regardless.
    pub content_type: Option<String>,
}

// Downloads pages one at a time with a shared client
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    // Builds the HTTP client from the run's fetch settings
    //
    // This is the only place a FetchError is fatal: without a client there
    // is nothing to do.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    // Fetches a web page and returns its body
    //
    // Parameters:
    //   url: absolute URL to GET
    //
    // Returns: FetchedPage on any 2xx answer, FetchError otherwise
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage {
            body,
            content_type,
        })
    }
}
