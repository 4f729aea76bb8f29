//! Skytrace Core - Foundation crate for the Skytrace aircraft lookup tool.
//!
//! This crate provides shared types, error handling and configuration
//! management that the scraper crate and the command-line shell depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Validated query types (`Registration`, `Query`)
//!
//! # Example
//!
//! ```rust
//! use skytrace_core::{AppConfig, Query};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let query = Query::new("G-EUPT", 5, 3)?;
//!
//! assert_eq!(query.registration.as_str(), "G-EUPT");
//! assert!(config.sources.flightradar_url.starts_with("https://"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, HttpConfig, QueryConfig, SourcesConfig};
pub use error::{ConfigError, ConfigResult, SkytraceError};
pub use types::{Query, Registration};
