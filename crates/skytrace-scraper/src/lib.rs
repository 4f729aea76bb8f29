//! Skytrace Scraper - Aircraft and photo record extraction.
//!
//! This crate turns two kinds of public pages into typed records: an aircraft
//! page (header fields plus a table of recent flights) and a photo search
//! listing with one detail page per photo.
//!
//! # Architecture
//!
//! - **Document** ([`document`]): pages flattened into a shared, immutable element list
//! - **Cursor** ([`cursor`]): forward-only extraction over one document
//! - **Assembly** ([`aircraft`], [`photos`]): fixed cursor call sequences per page layout
//! - **Fan-out** ([`fanout`]): per-task outcomes merged by the pipelines
//! - **Delivery** ([`delivery`]): one result per spawned pipeline
//! - **Client** ([`client`]): runs both pipelines for a query
//!
//! # Example
//!
//! ```rust,ignore
//! use skytrace_core::{AppConfig, Query};
//! use skytrace_scraper::LookupClient;
//!
//! let client = LookupClient::from_config(&AppConfig::default())?;
//! let query = Query::new("G-EUPT", 5, 3)?;
//!
//! let lookup = client.lookup(&query).await;
//! let aircraft = lookup.aircraft?;
//! println!("{} flights", aircraft.flights.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aircraft;
pub mod client;
pub mod cursor;
pub mod delivery;
pub mod document;
pub mod error;
pub mod fanout;
pub mod fetch;
#[allow(missing_docs)]
pub mod photos;
#[allow(missing_docs)]
pub mod records;

// Re-export commonly used types
pub use client::{Lookup, LookupClient};
pub use cursor::Cursor;
pub use delivery::Delivery;
pub use document::{Document, Element, Selector};
pub use error::{FetchError, Result, ScrapeError};
pub use fanout::Outcome;
pub use fetch::{Fetcher, HttpFetcher};
pub use records::{AircraftRecord, AircraftSummary, FlightRecord, PhotoRecord, PhotoSetRecord};
