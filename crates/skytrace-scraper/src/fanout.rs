//! Per-task outcomes for fan-out extraction.
//!
//! Every concurrent sub-task (one flight row, one photo detail page) reports
//! an [`Outcome`]. Aggregators insert `Success` and `Partial` values and never
//! insert anything for `Skip` or `Fail`.

use crate::error::{Result, ScrapeError};

/// What a single fan-out task produced.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Fully assembled value
    Success(T),
    /// Degraded value that is still worth keeping
    Partial(T),
    /// The sub-resource does not exist (cursor ran out of matches)
    Skip,
    /// Any other failure
    Fail(ScrapeError),
}

impl<T> Outcome<T> {
    /// Classify an extraction result: `NotFound` becomes `Skip`, any other
    /// error becomes `Fail`.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) if err.is_not_found() => Self::Skip,
            Err(err) => Self::Fail(err),
        }
    }

    /// The value to insert, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) | Self::Partial(value) => Some(value),
            Self::Skip | Self::Fail(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_from_result_classification() {
        assert!(matches!(Outcome::from_result(Ok(7)), Outcome::Success(7)));

        let missing: Result<i32> = Err(ScrapeError::NotFound {
            selector: "td".to_string(),
            requested: 1,
            found: 0,
        });
        assert!(matches!(Outcome::from_result(missing), Outcome::Skip));

        let broken: Result<i32> = Err(FetchError::Status {
            url: "https://example.com".to_string(),
            status: 500,
        }
        .into());
        assert!(matches!(
            Outcome::from_result(broken),
            Outcome::Fail(ScrapeError::Network(_))
        ));
    }

    #[test]
    fn test_only_values_are_inserted() {
        assert_eq!(Outcome::Success(1).into_value(), Some(1));
        assert_eq!(Outcome::Partial(2).into_value(), Some(2));
        assert_eq!(Outcome::<i32>::Skip.into_value(), None);
        assert_eq!(
            Outcome::<i32>::Fail(ScrapeError::DeliveryDropped).into_value(),
            None
        );
    }
}
