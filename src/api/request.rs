//! Request types for the lounge API.
//!
//! Session and booking bodies reuse the service request types; this module
//! adds the pricing-only requests and query strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::SessionChange;
use crate::models::DeviceSelection;

/// Request body for the `/quote` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Hours of play.
    pub duration_hours: f64,
    /// Number of people in the group.
    pub people_count: i64,
    /// Machines selected.
    #[serde(default)]
    pub devices: DeviceSelection,
    /// Local wall-clock time to price at. Defaults to the lounge's current
    /// local time.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Request body for the `/quote/extension` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionRequest {
    /// Amount already billed for the session.
    pub previous_amount: f64,
    /// Current session length in hours.
    pub duration_hours: f64,
    /// Current headcount.
    pub people_count: i64,
    /// Machines currently held.
    #[serde(default)]
    pub devices: DeviceSelection,
    /// Time, people and machines being added.
    #[serde(default)]
    pub change: SessionChange,
    /// Local wall-clock time to price at.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Query string for `/availability/window`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityWindowQuery {
    /// Window start (inclusive).
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Window end (exclusive).
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceType;

    #[test]
    fn test_quote_request_accepts_legacy_devices() {
        let json = r#"{
            "duration_hours": 1.5,
            "people_count": 3,
            "devices": {"ps": 2, "pc": [1, 4]},
            "at": "2026-01-17T19:00:00"
        }"#;

        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.devices.ids(DeviceType::Ps), &[2]);
        assert_eq!(request.devices.ids(DeviceType::Pc), &[1, 4]);
        assert!(request.at.is_some());
    }

    #[test]
    fn test_quote_request_defaults() {
        let json = r#"{"duration_hours": 1, "people_count": 1}"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!(request.devices.is_empty());
        assert!(request.at.is_none());
    }

    #[test]
    fn test_extension_request_change_defaults() {
        let json = r#"{"previous_amount": 140, "duration_hours": 1, "people_count": 1}"#;
        let request: ExtensionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.change, SessionChange::default());
    }
}
