//! Page fetching.
//!
//! The pipelines only need `fetch(url) -> Document`. [`HttpFetcher`] provides
//! it over HTTP; tests plug in their own [`Fetcher`].

use crate::document::Document;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use skytrace_core::HttpConfig;
use std::time::Duration;

/// Source of parsed pages.
///
/// Implementations must be thread-safe (Send + Sync); pipelines call `fetch`
/// from many concurrent tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download and parse the page at `url`.
    ///
    /// # Errors
    /// Returns error if the page cannot be retrieved.
    async fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// [`Fetcher`] backed by a `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher using the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        tracing::debug!("Fetching {}", url);

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
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(bytes = body.len(), "Fetched {}", url);
        Ok(Document::parse(&body))
    }
}
