//! Output records.
//!
//! Serialized field names are consumed by downstream JSON clients and must not
//! change.

use serde::{Deserialize, Serialize};

/// Aircraft details with its recent flights.
///
/// `flights` is in task completion order, not page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AircraftRecord {
    pub aircraft: String,
    pub airline: String,
    pub operator: String,
    pub type_code: String,
    pub airline_code: String,
    pub operator_code: String,
    pub mode_s: String,
    pub flights: Vec<FlightRecord>,
}

/// One row of an aircraft's flight history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Flight")]
    pub flight: String,
    #[serde(rename = "FlightTime")]
    pub flight_time: String,
    #[serde(rename = "STD")]
    pub scheduled_departure: String,
    #[serde(rename = "ATD")]
    pub actual_departure: String,
    #[serde(rename = "STA")]
    pub scheduled_arrival: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Photos of one aircraft, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSetRecord {
    #[serde(rename = "Reg")]
    pub registration: String,
    #[serde(rename = "Images")]
    pub images: Vec<PhotoRecord>,
}

/// A single photo.
///
/// When the detail page could not be fetched or read, only `link` and
/// `thumbnail` are set; see [`PhotoRecord::is_partial`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhotoRecord {
    pub image: String,
    pub link: String,
    pub thumbnail: String,
    pub date_taken: String,
    pub date_uploaded: String,
    pub location: String,
    pub photographer: String,
    pub aircraft: Option<AircraftSummary>,
}

impl PhotoRecord {
    /// A record holding only what the listing page provides.
    #[must_use]
    pub fn partial(link: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            thumbnail: thumbnail.into(),
            ..Self::default()
        }
    }

    /// True when nothing from the detail page made it into the record.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.image.is_empty()
            && self.date_taken.is_empty()
            && self.date_uploaded.is_empty()
            && self.location.is_empty()
            && self.photographer.is_empty()
            && self.aircraft.is_none()
    }
}

/// Aircraft identification shown on a photo's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AircraftSummary {
    pub aircraft: String,
    pub serial: String,
    pub airline: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn keys(value: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_aircraft_field_names() {
        let record = AircraftRecord {
            flights: vec![FlightRecord::default()],
            ..AircraftRecord::default()
        };
        let value = serde_json::to_value(&record).expect("serialize aircraft");

        assert_eq!(
            keys(&value),
            vec![
                "Aircraft",
                "Airline",
                "AirlineCode",
                "Flights",
                "ModeS",
                "Operator",
                "OperatorCode",
                "TypeCode"
            ]
        );
        assert_eq!(
            keys(&value["Flights"][0]),
            vec!["ATD", "Date", "Flight", "FlightTime", "From", "STA", "STD", "Status", "To"]
        );
    }

    #[test]
    fn test_photo_field_names() {
        let record = PhotoSetRecord {
            registration: "G-EUPT".to_string(),
            images: vec![PhotoRecord {
                aircraft: Some(AircraftSummary::default()),
                ..PhotoRecord::default()
            }],
        };
        let value = serde_json::to_value(&record).expect("serialize photos");

        assert_eq!(keys(&value), vec!["Images", "Reg"]);
        assert_eq!(
            keys(&value["Images"][0]),
            vec![
                "Aircraft",
                "DateTaken",
                "DateUploaded",
                "Image",
                "Link",
                "Location",
                "Photographer",
                "Thumbnail"
            ]
        );
        assert_eq!(
            keys(&value["Images"][0]["Aircraft"]),
            vec!["Aircraft", "Airline", "Serial"]
        );
    }

    #[test]
    fn test_missing_summary_is_null() {
        let value = serde_json::to_value(PhotoRecord::partial("l", "t")).expect("serialize");
        assert_eq!(value["Aircraft"], Value::Null);
        assert_eq!(value["Link"], json!("l"));
    }

    #[test]
    fn test_round_trip() {
        let record = AircraftRecord {
            aircraft: "Airbus A319-131".to_string(),
            airline: "British Airways".to_string(),
            operator: "British Airways".to_string(),
            type_code: "A319".to_string(),
            airline_code: "BA/BAW".to_string(),
            operator_code: "BA/BAW".to_string(),
            mode_s: "400C0F".to_string(),
            flights: vec![FlightRecord {
                date: "17 Oct 2026".to_string(),
                from: "London (LHR)".to_string(),
                to: "Madrid (MAD)".to_string(),
                flight: "BA456".to_string(),
                flight_time: "2:05".to_string(),
                scheduled_departure: "08:00".to_string(),
                actual_departure: "08:12".to_string(),
                scheduled_arrival: "10:05".to_string(),
                status: "Landed 09:58".to_string(),
            }],
        };

        let json = serde_json::to_string(&record).expect("serialize");
        let back: AircraftRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
        assert_eq!(serde_json::to_string(&back).expect("re-serialize"), json);
    }

    #[test]
    fn test_partial_detection() {
        let mut photo = PhotoRecord::partial("https://x/photo/1", "https://cdn/1.jpg");
        assert!(photo.is_partial());

        photo.photographer = "Jane Spotter".to_string();
        assert!(!photo.is_partial());
    }
}
