//! Shared fixtures for the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use skytrace_core::SourcesConfig;
use skytrace_scraper::{Document, FetchError, Fetcher};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FLIGHTRADAR: &str = "https://fr.test";
pub const JETPHOTOS: &str = "https://jp.test";

/// In-memory page source that counts fetches.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    pub fn panicking(mut self, url: impl Into<String>) -> Self {
        self.panicking.insert(url.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        assert!(!self.panicking.contains(url), "fetcher crashed on {url}");

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        match self.pages.get(url) {
            Some(html) => Ok(Document::parse(html)),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn sources() -> SourcesConfig {
    SourcesConfig {
        flightradar_url: FLIGHTRADAR.to_string(),
        jetphotos_url: JETPHOTOS.to_string(),
    }
}

/// Detail page without the large image.
pub fn detail_page_without_image(registration: &str) -> String {
    format!(
        r#"<html><body>
            <h4 class="headerText4 color-shark">{registration}</h4>
            <h4 class="headerText4 color-shark">2026-08-01</h4>
            <h4 class="headerText4 color-shark">2026-09-01</h4>
        </body></html>"#
    )
}

const AIRCRAFT_HEADER: &str = r#"
    <span class="details">Airbus A320-232</span>
    <span class="details">Airline</span>
    <a href="/data/airlines/u2-ezy">easyJet</a>
    <span class="details">easyJet Europe</span>
    <span class="details">A320</span>
    <span class="details">U2 / EZY</span>
    <span class="details">EC / EJU</span>
    <span class="details">440172</span>
"#;

fn flight_row(i: usize) -> String {
    format!(
        r#"<tr>
            <td class="hidden-xs hidden-sm">{i:02} Oct 2026</td>
            <td class="text-center-sm hidden-xs hidden-sm">Berlin (BER)</td>
            <td class="text-center-sm hidden-xs hidden-sm">Lisbon (LIS)</td>
            <td class="hidden-xs hidden-sm">A320</td>
            <td><a class="fbold" href="/data/flights/u2{i}">U2{i}</a></td>
            <td class="hidden-xs hidden-sm">3:30</td>
            <td class="hidden-xs hidden-sm">06:00</td>
            <td class="hidden-xs hidden-sm">06:04</td>
            <td class="hidden-xs hidden-sm">08:30</td>
            <td class="hidden-xs hidden-sm"></td>
            <td class="hidden-xs hidden-sm">Landed</td>
        </tr>"#
    )
}

/// Aircraft page with `rows` flight rows.
pub fn aircraft_page(rows: usize) -> String {
    let body: String = (0..rows).map(flight_row).collect();
    format!(
        r#"<html><body>{AIRCRAFT_HEADER}
        <table>
            <tr>
                <td class="w40 hidden-xs hidden-sm">Date</td>
                <td class="w40 hidden-xs hidden-sm">From</td>
                <td class="w40 hidden-xs hidden-sm">To</td>
            </tr>
            {body}
        </table></body></html>"#
    )
}

/// Aircraft page with the header block but no flight table.
pub fn aircraft_page_without_table() -> String {
    format!("<html><body>{AIRCRAFT_HEADER}</body></html>")
}

/// Photo listing with `count` results.
pub fn listing_page(count: usize) -> String {
    let results: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="result">
                    <a class="result__photoLink" href="/photo/{i}">
                        <img class="result__photo" src="/thumb/{i}.jpg">
                    </a>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{results}</body></html>")
}

/// Detail page for photo `i`.
pub fn detail_page(i: usize, registration: &str) -> String {
    format!(
        r#"<html><body>
            <img class="large-photo__img" src="https://cdn.jp.test/full/{i}.jpg">
            <h4 class="headerText4 color-shark">{registration}</h4>
            <h4 class="headerText4 color-shark">2026-08-{i:02}</h4>
            <h4 class="headerText4 color-shark">2026-09-{i:02}</h4>
            <h2 class="header-reset">Aircraft</h2>
            <a class="link" href="/a">Airbus A320-232</a>
            <a class="link" href="/b">easyJet Europe</a>
            <a class="link" href="/c">4215</a>
            <h5 class="header-reset">Location</h5>
            <a class="link" href="/l">Berlin Brandenburg (BER / EDDB)</a>
            <h6 class="header-reset">Photographer {i}</h6>
        </body></html>"#
    )
}

pub fn aircraft_url(registration: &str) -> String {
    format!("{FLIGHTRADAR}/data/aircraft/{registration}")
}

pub fn listing_url(registration: &str) -> String {
    format!("{JETPHOTOS}/photo/keyword/{registration}")
}

pub fn photo_url(i: usize) -> String {
    format!("{JETPHOTOS}/photo/{i}")
}
