//! Skytrace command-line shell
//!
//! Parses a lookup, runs the requested pipelines and prints one JSON object on
//! stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use skytrace_core::{AppConfig, Query};
use skytrace_scraper::{AircraftRecord, LookupClient, PhotoSetRecord};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "skytrace")]
#[command(about = "Look up an aircraft's details, recent flights and photos")]
#[command(version)]
struct Cli {
    /// Aircraft registration (tail number), e.g. G-EUPT
    registration: String,

    /// Maximum number of recent flights
    #[arg(long)]
    flights: Option<usize>,

    /// Maximum number of photos
    #[arg(long)]
    photos: Option<usize>,

    /// Configuration file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single pipeline
    #[arg(long, value_enum)]
    only: Option<Pipeline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Pipeline {
    Aircraft,
    Photos,
}

/// Printed result. A pipeline that failed or was not run is `null`.
#[derive(Debug, Serialize)]
struct Report {
    aircraft: Option<AircraftRecord>,
    photos: Option<PhotoSetRecord>,
}

impl Report {
    /// Build the report, returning whether every pipeline that ran failed.
    fn collect(
        aircraft: Option<skytrace_scraper::Result<AircraftRecord>>,
        photos: Option<skytrace_scraper::Result<PhotoSetRecord>>,
    ) -> (Self, bool) {
        let ran = usize::from(aircraft.is_some()) + usize::from(photos.is_some());
        let aircraft = aircraft.and_then(std::result::Result::ok);
        let photos = photos.and_then(std::result::Result::ok);
        let succeeded = usize::from(aircraft.is_some()) + usize::from(photos.is_some());

        (Self { aircraft, photos }, ran > 0 && succeeded == 0)
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,skytrace=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_with_env_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load_with_env().context("failed to load config")?,
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn build_query(cli: &Cli, config: &AppConfig) -> Result<Query> {
    let query = Query::new(
        cli.registration.as_str(),
        cli.flights.unwrap_or(config.query.default_flights),
        cli.photos.unwrap_or(config.query.default_photos),
    )?;
    Ok(query)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let query = build_query(&cli, &config)?;
    let client = LookupClient::from_config(&config)?;

    info!(
        registration = %query.registration,
        flights = query.flights,
        photos = query.photos,
        "Starting lookup"
    );

    let (aircraft, photos) = match cli.only {
        None => {
            let lookup = client.lookup(&query).await;
            (Some(lookup.aircraft), Some(lookup.photos))
        }
        Some(Pipeline::Aircraft) => (Some(client.spawn_aircraft(query).recv().await), None),
        Some(Pipeline::Photos) => (None, Some(client.spawn_photos(query).recv().await)),
    };

    if let Some(Err(e)) = &aircraft {
        error!("Aircraft: {}", e);
    }
    if let Some(Err(e)) = &photos {
        error!("Photos: {}", e);
    }

    let (report, failed) = Report::collect(aircraft, photos);
    println!("{}", serde_json::to_string(&report)?);

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!("Starting Skytrace v{}", env!("CARGO_PKG_VERSION"));

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
