//! HTTP fetcher implementation
//!
//! All network access for the crawler goes through this module: building
//! the HTTP client and fetching page bodies. Network failures are values
//! ([`FetchOutcome`]), never errors, so no per-page failure can abort the
//! crawl loop.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Retrievable response (2xx) with its body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Response with a non-retrievable status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, TLS failure, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// The status code, when one was received at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } | Self::HttpError { status_code } => {
                Some(*status_code)
            }
            Self::NetworkError { .. } => None,
        }
    }
}

/// Builds the HTTP client used for the whole crawl session
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Redirects are followed by the client; the body of any 2xx response is
/// returned as a success. Everything else becomes an [`FetchOutcome`]
/// variant rather than an error.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: format!("Failed to read response body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };

            FetchOutcome::NetworkError { error }
        }
    }
}
