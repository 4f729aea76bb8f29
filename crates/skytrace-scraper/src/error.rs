//! Error types for fetching and extraction.

use skytrace_core::SkytraceError;
use thiserror::Error;

/// Failure to obtain a document from the network.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors produced while building records.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Fetching a page failed
    #[error("network error: {0}")]
    Network(#[from] FetchError),

    /// The cursor ran out of matching elements before satisfying a count
    #[error("{selector} not found: wanted {requested}, found {found}")]
    NotFound {
        /// Selector that was searched for
        selector: String,
        /// Number of matches the caller required
        requested: usize,
        /// Number of matches left between the cursor and the end of the document
        found: usize,
    },

    /// A base URL or an extracted link could not be resolved
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// Offending input
        url: String,
        /// Parser message
        reason: String,
    },

    /// The producing task ended without sending a result
    #[error("result delivery dropped before a value was sent")]
    DeliveryDropped,

    /// Configuration or validation failure from the core crate
    #[error(transparent)]
    Core(#[from] SkytraceError),
}

impl ScrapeError {
    /// Whether this error means "the document has no more matching elements".
    ///
    /// Callers paginating a repeating section treat this as end-of-data.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
