//! Lookup client tying the fetcher, the configured sites and both pipelines together.
//!
//! This module provides the [`LookupClient`] which runs the aircraft and photo
//! pipelines on their own tasks and hands each result back through a
//! [`Delivery`].

use crate::aircraft::scrape_aircraft;
use crate::delivery::Delivery;
use crate::error::{Result, ScrapeError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::photos::scrape_photos;
use crate::records::{AircraftRecord, PhotoSetRecord};
use skytrace_core::{AppConfig, Query, SkytraceError, SourcesConfig};
use std::sync::Arc;
use url::Url;

/// Parsed base URLs of the two sites.
#[derive(Debug, Clone)]
struct Sites {
    flightradar: Url,
    jetphotos: Url,
}

impl Sites {
    fn from_config(sources: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            flightradar: parse_base(&sources.flightradar_url)?,
            jetphotos: parse_base(&sources.jetphotos_url)?,
        })
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ScrapeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Results of running both pipelines for one query.
#[derive(Debug)]
pub struct Lookup {
    /// Aircraft details and flights
    pub aircraft: Result<AircraftRecord>,
    /// Photo set
    pub photos: Result<PhotoSetRecord>,
}

/// Runs lookups against the configured sites.
#[derive(Clone)]
pub struct LookupClient {
    /// Page source shared by every task
    fetcher: Arc<dyn Fetcher>,
    /// Site base URLs
    sites: Arc<Sites>,
}

impl LookupClient {
    /// Create a client over `fetcher` using the given site base URLs.
    ///
    /// # Errors
    /// Returns error if a base URL does not parse.
    pub fn new(fetcher: Arc<dyn Fetcher>, sources: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            sites: Arc::new(Sites::from_config(sources)?),
        })
    }

    /// Create a client that fetches over HTTP with the application configuration.
    ///
    /// # Errors
    /// Returns error if the configuration does not validate or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate().map_err(SkytraceError::from)?;
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::new(Arc::new(fetcher), &config.sources)
    }

    /// Fetch the aircraft record for `query`.
    pub async fn aircraft(&self, query: &Query) -> Result<AircraftRecord> {
        scrape_aircraft(self.fetcher.as_ref(), &self.sites.flightradar, query).await
    }

    /// Fetch the photo set for `query`.
    pub async fn photos(&self, query: &Query) -> Result<PhotoSetRecord> {
        scrape_photos(&self.fetcher, &self.sites.jetphotos, query).await
    }

    /// Start the aircraft pipeline on its own task.
    #[must_use]
    pub fn spawn_aircraft(&self, query: Query) -> Delivery<AircraftRecord> {
        let client = self.clone();
        Delivery::spawn(async move { client.aircraft(&query).await })
    }

    /// Start the photo pipeline on its own task.
    #[must_use]
    pub fn spawn_photos(&self, query: Query) -> Delivery<PhotoSetRecord> {
        let client = self.clone();
        Delivery::spawn(async move { client.photos(&query).await })
    }

    /// Run both pipelines concurrently and wait for both.
    pub async fn lookup(&self, query: &Query) -> Lookup {
        let aircraft = self.spawn_aircraft(query.clone());
        let photos = self.spawn_photos(query.clone());

        let (aircraft, photos) = tokio::join!(aircraft.recv(), photos.recv());

        if let Err(e) = &aircraft {
            tracing::error!("Aircraft lookup for {} failed: {}", query.registration, e);
        }
        if let Err(e) = &photos {
            tracing::error!("Photo lookup for {} failed: {}", query.registration, e);
        }

        Lookup { aircraft, photos }
    }
}
