//! Session model and ledger helpers.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DeviceSelection;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Players are on the machines.
    Active,
    /// The session has been closed out.
    Completed,
}

/// A group that joined a running session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Number of people who joined.
    #[serde(default)]
    pub people_count: u32,
    /// Machines they took.
    #[serde(default)]
    pub devices: DeviceSelection,
}

/// A play session and its payment ledger.
///
/// `price` is the running total owed, `paid_amount` what has been collected
/// and `remaining_amount` the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session.
    pub id: Uuid,
    /// Customer the session is registered to.
    pub customer_name: String,
    /// Customer phone number.
    #[serde(default)]
    pub contact_number: String,
    /// Booked length in hours.
    pub duration_hours: f64,
    /// Number of people playing.
    pub people_count: u32,
    /// Free-text snack order.
    #[serde(default)]
    pub snacks: String,
    /// Machines held by the session.
    pub devices: DeviceSelection,
    /// Total owed.
    pub price: Decimal,
    /// Total collected.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// People who have settled their share.
    #[serde(default)]
    pub paid_people: u32,
    /// `price - paid_amount`.
    pub remaining_amount: Decimal,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// When play started.
    pub start_time: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Last ledger update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the session was completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Groups that joined after the start.
    #[serde(default)]
    pub members: Vec<Member>,
    /// The booking this session was created from, if any.
    #[serde(default)]
    pub original_booking_id: Option<Uuid>,
}

impl Session {
    /// Returns when the booked time runs out.
    ///
    /// A duration too large to represent ends at the latest representable
    /// instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use lounge_engine::models::{DeviceSelection, Session, SessionStatus};
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let start = Utc.with_ymd_and_hms(2026, 1, 13, 10, 0, 0).unwrap();
    /// let session = Session {
    ///     id: Uuid::new_v4(),
    ///     customer_name: "Asha".to_string(),
    ///     contact_number: String::new(),
    ///     duration_hours: 1.5,
    ///     people_count: 2,
    ///     snacks: String::new(),
    ///     devices: DeviceSelection::new(),
    ///     price: Decimal::ZERO,
    ///     paid_amount: Decimal::ZERO,
    ///     paid_people: 0,
    ///     remaining_amount: Decimal::ZERO,
    ///     status: SessionStatus::Active,
    ///     start_time: start,
    ///     created_at: start,
    ///     updated_at: None,
    ///     completed_at: None,
    ///     members: vec![],
    ///     original_booking_id: None,
    /// };
    /// assert_eq!(session.end_time(), Utc.with_ymd_and_hms(2026, 1, 13, 11, 30, 0).unwrap());
    /// ```
    pub fn end_time(&self) -> DateTime<Utc> {
        let minutes = (self.duration_hours * 60.0).round() as i64;
        Duration::try_minutes(minutes)
            .and_then(|length| self.start_time.checked_add_signed(length))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns true if the session overlaps the half-open window `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time() > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 13, h, m, 0).unwrap()
    }

    fn session(start: DateTime<Utc>, duration_hours: f64) -> Session {
        Session {
            id: Uuid::new_v4(),
            customer_name: "Ravi".to_string(),
            contact_number: String::new(),
            duration_hours,
            people_count: 1,
            snacks: String::new(),
            devices: DeviceSelection::new(),
            price: Decimal::new(100, 0),
            paid_amount: Decimal::ZERO,
            paid_people: 0,
            remaining_amount: Decimal::new(100, 0),
            status: SessionStatus::Active,
            start_time: start,
            created_at: start,
            updated_at: None,
            completed_at: None,
            members: vec![],
            original_booking_id: None,
        }
    }

    #[test]
    fn test_end_time_adds_fractional_hours() {
        let s = session(utc(10, 0), 0.25);
        assert_eq!(s.end_time(), utc(10, 15));
    }

    #[test]
    fn test_huge_duration_ends_at_latest_instant() {
        let s = session(utc(10, 0), 1e10);
        assert_eq!(s.end_time(), DateTime::<Utc>::MAX_UTC);
        assert!(s.overlaps(utc(12, 0), utc(13, 0)));
        assert!(!s.overlaps(utc(8, 0), utc(9, 0)));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let s = session(utc(10, 0), 1.0);
        assert!(s.overlaps(utc(10, 30), utc(12, 0)));
        assert!(!s.overlaps(utc(11, 0), utc(12, 0)));
        assert!(!s.overlaps(utc(9, 0), utc(10, 0)));
        assert!(s.overlaps(utc(9, 0), utc(10, 1)));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SessionStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let s = session(utc(18, 0), 2.0);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"status\":\"active\""));
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
    }
}
