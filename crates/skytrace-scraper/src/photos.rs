//! Photo listing and detail pages.
//!
//! The listing is read sequentially with one cursor. Each listed photo's
//! detail page is then fetched concurrently and written back into the slot
//! matching its listing position, so output order always follows the listing.

use crate::cursor::Cursor;
use crate::document::Selector;
use crate::error::{Result, ScrapeError};
use crate::fanout::Outcome;
use crate::fetch::Fetcher;
use crate::records::{AircraftSummary, PhotoRecord, PhotoSetRecord};
use skytrace_core::Query;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use url::Url;

const RESULT_LINK: Selector = Selector::new("a", "result__photoLink");
const RESULT_THUMBNAIL: Selector = Selector::new("img", "result__photo");
const LARGE_PHOTO: Selector = Selector::new("img", "large-photo__img");
const PHOTO_HEADER: Selector = Selector::new("h4", "headerText4 color-shark");
const AIRCRAFT_HEADING: Selector = Selector::new("h2", "header-reset");
const LOCATION_HEADING: Selector = Selector::new("h5", "header-reset");
const PHOTOGRAPHER: Selector = Selector::new("h6", "header-reset");
const INFO_LINK: Selector = Selector::new("a", "link");

/// One photo as listed on the search page, URLs already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub link: String,
    pub thumbnail: String,
}

/// Fields read from a photo's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoDetail {
    pub registration: String,
    pub image: Option<String>,
    pub date_taken: String,
    pub date_uploaded: String,
    pub aircraft: Option<AircraftSummary>,
    pub location: String,
    pub photographer: String,
}

impl PhotoDetail {
    fn apply_to(self, photo: &mut PhotoRecord) {
        photo.image = self.image.unwrap_or_default();
        photo.date_taken = self.date_taken;
        photo.date_uploaded = self.date_uploaded;
        photo.aircraft = self.aircraft;
        photo.location = self.location;
        photo.photographer = self.photographer;
    }
}

/// URL of the photo search page for `query`.
pub fn listing_url(base: &Url, query: &Query) -> String {
    format!(
        "{}/photo/keyword/{}",
        base.as_str().trim_end_matches('/'),
        query.registration
    )
}

/// Fetch the listing for `query` and up to `query.photos` detail pages.
///
/// `query.photos == 0` returns immediately without touching the network.
/// The request fails if the listing can't be fetched or lists no photos.
/// Detail pages that can't be fetched or read leave partial records.
pub async fn scrape_photos(
    fetcher: &Arc<dyn Fetcher>,
    base: &Url,
    query: &Query,
) -> Result<PhotoSetRecord> {
    if query.photos == 0 {
        return Ok(PhotoSetRecord {
            registration: query.registration.normalized(),
            images: Vec::new(),
        });
    }

    let url = listing_url(base, query);
    let document = fetcher.fetch(&url).await?;

    let mut cursor = Cursor::new(document);
    let entries = read_listing(&mut cursor, query.photos, base)?;
    cursor.release();

    let (images, registration) = collect_photos(Arc::clone(fetcher), &entries).await;

    let registration = registration
        .map(|reg| reg.trim().to_ascii_uppercase())
        .filter(|reg| !reg.is_empty())
        .unwrap_or_else(|| query.registration.normalized());

    info!(
        registration = %registration,
        photos = images.len(),
        partial = images.iter().filter(|p| p.is_partial()).count(),
        "Assembled photo set"
    );

    Ok(PhotoSetRecord {
        registration,
        images,
    })
}

/// Read up to `count` (link, thumbnail) pairs from a listing page.
///
/// Running out of pairs ends the listing once at least one was read; with
/// none read it is an error.
pub fn read_listing(cursor: &mut Cursor, count: usize, base: &Url) -> Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();

    for _ in 0..count {
        let pair = cursor
            .next_attribute(RESULT_LINK)
            .and_then(|link| cursor.next_attribute(RESULT_THUMBNAIL).map(|thumb| (link, thumb)));

        match pair {
            Ok((link, thumbnail)) => entries.push(ListingEntry {
                link: resolve(base, &link)?,
                thumbnail: resolve(base, &thumbnail)?,
            }),
            Err(e) if e.is_not_found() && !entries.is_empty() => {
                debug!(found = entries.len(), requested = count, "End of photo listing");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(entries)
}

/// Read a photo detail page.
///
/// The header triple (registration, taken, uploaded) is required. A page
/// without the large image still yields its header so the registration can
/// be used; the photo itself is then kept partial. Aircraft, location and
/// photographer are optional.
pub fn read_detail(cursor: &mut Cursor) -> Result<PhotoDetail> {
    // A failed call leaves the cursor in place for the header read.
    let image = match cursor.next_attribute(LARGE_PHOTO) {
        Ok(image) => Some(image),
        Err(e) => {
            debug!("No large image: {}", e);
            None
        }
    };

    let mut header = cursor.extract_text(PHOTO_HEADER, 3)?.into_iter();
    let registration = header.next().unwrap_or_default();
    let date_taken = header.next().unwrap_or_default();
    let date_uploaded = header.next().unwrap_or_default();

    if let Err(e) = cursor.skip(AIRCRAFT_HEADING, 1) {
        debug!("No aircraft heading: {}", e);
    }
    let aircraft = cursor.extract_text(INFO_LINK, 3).ok().map(|links| {
        let mut links = links.into_iter();
        AircraftSummary {
            aircraft: links.next().unwrap_or_default(),
            airline: links.next().unwrap_or_default(),
            serial: links.next().unwrap_or_default(),
        }
    });

    if let Err(e) = cursor.skip(LOCATION_HEADING, 1) {
        debug!("No location heading: {}", e);
    }
    let location = cursor.next_text(INFO_LINK).unwrap_or_default();
    let photographer = cursor.next_text(PHOTOGRAPHER).unwrap_or_default();

    Ok(PhotoDetail {
        registration,
        image,
        date_taken,
        date_uploaded,
        aircraft,
        location,
        photographer,
    })
}

/// Fetch every detail page concurrently, one task per entry.
///
/// Returns one record per entry, in entry order, plus the registration the
/// detail pages reported (if any did). A detail page that fails, lacks its
/// image or whose task panics leaves the listing-only record in its slot.
pub async fn collect_photos(
    fetcher: Arc<dyn Fetcher>,
    entries: &[ListingEntry],
) -> (Vec<PhotoRecord>, Option<String>) {
    let mut images: Vec<PhotoRecord> = entries
        .iter()
        .map(|entry| PhotoRecord::partial(entry.link.clone(), entry.thumbnail.clone()))
        .collect();

    let registration: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let mut tasks = JoinSet::new();

    for (index, entry) in entries.iter().cloned().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        let registration = Arc::clone(&registration);

        tasks.spawn(async move {
            let mut photo = PhotoRecord::partial(entry.link.clone(), entry.thumbnail);

            let outcome = match fetch_detail(fetcher.as_ref(), &entry.link).await {
                Ok(detail) => {
                    if !detail.registration.is_empty() {
                        *registration.lock().await = Some(detail.registration.clone());
                    }
                    if detail.image.is_some() {
                        detail.apply_to(&mut photo);
                        Outcome::Success(photo)
                    } else {
                        warn!("Keeping partial photo for {}: no image", entry.link);
                        Outcome::Partial(photo)
                    }
                }
                Err(e) => {
                    warn!("Keeping partial photo for {}: {}", entry.link, e);
                    Outcome::Partial(photo)
                }
            };
            (index, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                if let Some(photo) = outcome.into_value() {
                    images[index] = photo;
                }
            }
            Err(e) => error!("Photo detail task aborted: {}", e),
        }
    }

    let registration = registration.lock().await.take();
    (images, registration)
}

async fn fetch_detail(fetcher: &dyn Fetcher, link: &str) -> Result<PhotoDetail> {
    let document = fetcher.fetch(link).await?;
    let mut cursor = Cursor::new(document);
    let detail = read_detail(&mut cursor)?;
    cursor.release();
    Ok(detail)
}

/// Make a listing link absolute.
///
/// Root-relative and path-relative links are appended to the configured base,
/// keeping any path it carries. Protocol-relative links take the base scheme.
fn resolve(base: &Url, raw: &str) -> Result<String> {
    let invalid = |e: url::ParseError| ScrapeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    };

    if raw.starts_with("//") {
        return base.join(raw).map(String::from).map_err(invalid);
    }

    match Url::parse(raw) {
        Ok(absolute) => Ok(absolute.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = format!(
                "{}/{}",
                base.as_str().trim_end_matches('/'),
                raw.trim_start_matches('/')
            );
            Url::parse(&joined).map(String::from).map_err(invalid)
        }
        Err(e) => Err(invalid(e)),
    }
}
