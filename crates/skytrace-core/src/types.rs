//! Shared query types.
//!
//! A lookup is described by a [`Query`]: which aircraft, and how many flights
//! and photos to fetch for it.

use crate::error::SkytraceError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for aircraft registrations (tail numbers) with validation.
///
/// Registrations are 2-10 characters of ASCII letters, digits and hyphens and
/// must start with a letter or digit (`N12345`, `G-EUPT`, `9V-SMA`). The value
/// is interpolated into URL paths, so nothing else is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Registration(String);

impl Registration {
    /// Create a new `Registration` from a string.
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    ///
    /// # Errors
    /// Returns error if the registration doesn't match the required format.
    pub fn new(reg: impl Into<String>) -> Result<Self, SkytraceError> {
        let reg = reg.into().trim().to_string();
        Self::validate(&reg)?;
        Ok(Self(reg))
    }

    /// Get the inner string value as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased form, as the photo site reports registrations.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    fn validate(reg: &str) -> Result<(), SkytraceError> {
        static REG_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = REG_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{1,9}$").expect("valid regex"));

        if regex.is_match(reg) {
            Ok(())
        } else {
            Err(SkytraceError::Validation(format!(
                "invalid registration: expected 2-10 letters, digits or hyphens, got '{reg}'"
            )))
        }
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Registration {
    type Error = SkytraceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Registration> for String {
    fn from(reg: Registration) -> Self {
        reg.0
    }
}

/// A lookup request.
///
/// `flights` and `photos` are upper bounds: fewer records come back when the
/// source pages list fewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Aircraft to look up
    pub registration: Registration,
    /// Maximum number of recent flights
    pub flights: usize,
    /// Maximum number of photos
    pub photos: usize,
}

impl Query {
    /// Build a query, validating the registration.
    pub fn new(
        registration: impl Into<String>,
        flights: usize,
        photos: usize,
    ) -> Result<Self, SkytraceError> {
        Ok(Self {
            registration: Registration::new(registration)?,
            flights,
            photos,
        })
    }
}
