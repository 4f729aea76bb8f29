//! Aircraft page: header fields plus a concurrent read of the flight table.

use crate::cursor::Cursor;
use crate::document::Selector;
use crate::error::Result;
use crate::fanout::Outcome;
use crate::fetch::Fetcher;
use crate::records::{AircraftRecord, FlightRecord};
use skytrace_core::Query;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use url::Url;

const DETAIL: Selector = Selector::new("span", "details");
const AIRLINE_LINK: Selector = Selector::new("a", "");
const TABLE_HEAD: Selector = Selector::new("td", "w40 hidden-xs hidden-sm");
const CELL: Selector = Selector::new("td", "hidden-xs hidden-sm");
const ROUTE_CELL: Selector = Selector::new("td", "text-center-sm hidden-xs hidden-sm");
const FLIGHT_LINK: Selector = Selector::new("a", "fbold");

/// Number of `TABLE_HEAD` cells before the first flight row.
const TABLE_HEAD_CELLS: usize = 3;

/// `CELL` matches consumed by one flight row.
const CELLS_PER_ROW: usize = 8;

/// URL of the aircraft page for `query`.
pub fn aircraft_url(base: &Url, query: &Query) -> String {
    format!(
        "{}/data/aircraft/{}",
        base.as_str().trim_end_matches('/'),
        query.registration
    )
}

/// Fetch an aircraft page and assemble its record with up to `query.flights` flights.
///
/// A failed fetch or missing header field fails the whole record. A page
/// without a flight table yields the header with no flights.
pub async fn scrape_aircraft(
    fetcher: &dyn Fetcher,
    base: &Url,
    query: &Query,
) -> Result<AircraftRecord> {
    let url = aircraft_url(base, query);
    let document = fetcher.fetch(&url).await?;
    let mut cursor = Cursor::new(document);

    let mut record = read_header(&mut cursor)?;

    if let Err(e) = cursor.skip(TABLE_HEAD, TABLE_HEAD_CELLS) {
        warn!("flights: {}", e);
        return Ok(record);
    }

    record.flights = collect_flights(&cursor, query.flights).await;
    cursor.release();

    info!(
        registration = %query.registration,
        flights = record.flights.len(),
        requested = query.flights,
        "Assembled aircraft record"
    );
    Ok(record)
}

/// Read the header block: aircraft, airline, then five detail fields.
pub fn read_header(cursor: &mut Cursor) -> Result<AircraftRecord> {
    let aircraft = cursor.next_text(DETAIL)?;

    cursor.skip(DETAIL, 1)?;
    let airline = cursor.next_text(AIRLINE_LINK)?;

    let mut details = cursor.extract_text(DETAIL, 5)?.into_iter();

    Ok(AircraftRecord {
        aircraft,
        airline,
        operator: details.next().unwrap_or_default(),
        type_code: details.next().unwrap_or_default(),
        airline_code: details.next().unwrap_or_default(),
        operator_code: details.next().unwrap_or_default(),
        mode_s: details.next().unwrap_or_default(),
        flights: Vec::new(),
    })
}

/// Read one flight row starting at the cursor.
pub fn read_flight_row(cursor: &mut Cursor) -> Result<FlightRecord> {
    let date = cursor.next_text(CELL)?;

    let mut route = cursor.extract_text(ROUTE_CELL, 2)?.into_iter();
    let from = route.next().unwrap_or_default();
    let to = route.next().unwrap_or_default();

    cursor.skip(CELL, 1)?;
    let flight = cursor.next_text(FLIGHT_LINK)?;

    let mut times = cursor.extract_text(CELL, 4)?.into_iter();
    let flight_time = times.next().unwrap_or_default();
    let scheduled_departure = times.next().unwrap_or_default();
    let actual_departure = times.next().unwrap_or_default();
    let scheduled_arrival = times.next().unwrap_or_default();

    let status = cursor
        .extract_text(CELL, 2)?
        .into_iter()
        .nth(1)
        .unwrap_or_default();

    Ok(FlightRecord {
        date,
        from,
        to,
        flight,
        flight_time,
        scheduled_departure,
        actual_departure,
        scheduled_arrival,
        status,
    })
}

/// Read the `row`-th flight row below the table anchor.
pub fn read_flight_row_at(cursor: &mut Cursor, row: usize) -> Result<FlightRecord> {
    cursor.skip(CELL, row * CELLS_PER_ROW)?;
    read_flight_row(cursor)
}

/// Extract up to `count` flights concurrently.
///
/// `table` must sit just below the table anchor. Each task forks its own
/// cursor from it and reads one row, so results don't depend on scheduling:
/// with `m` rows on the page the list holds `min(count, m)` flights, in
/// completion order. No task is started for a row index past the last cell
/// on the page.
pub async fn collect_flights(table: &Cursor, count: usize) -> Vec<FlightRecord> {
    let rows = count.min(table.count_remaining(CELL).div_ceil(CELLS_PER_ROW));
    if rows < count {
        debug!(requested = count, rows, "Fewer flight rows than requested");
    }

    let flights = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = JoinSet::new();

    for row in 0..rows {
        let mut cursor = table.fork();
        let flights = Arc::clone(&flights);

        tasks.spawn(async move {
            let outcome = Outcome::from_result(read_flight_row_at(&mut cursor, row));
            cursor.release();

            match outcome {
                Outcome::Success(flight) | Outcome::Partial(flight) => {
                    flights.lock().await.push(flight);
                }
                Outcome::Skip => debug!(row, "No flight row"),
                Outcome::Fail(e) => warn!(row, "Dropping flight row: {}", e),
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!("Flight extraction task aborted: {}", e);
        }
    }

    let mut flights = flights.lock().await;
    std::mem::take(&mut *flights)
}
