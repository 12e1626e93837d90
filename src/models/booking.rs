//! Booking model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DeviceSelection;

/// An upcoming reservation.
///
/// Bookings stay in the store until they are converted into a session or
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// Customer the booking is for.
    pub customer_name: String,
    /// Customer phone number.
    #[serde(default)]
    pub contact_number: String,
    /// Reserved start.
    pub booking_time: DateTime<Utc>,
    /// Reserved end, if the customer gave one.
    #[serde(default)]
    pub booking_end_time: Option<DateTime<Utc>>,
    /// Expected headcount.
    pub people_count: u32,
    /// Machines reserved.
    pub devices: DeviceSelection,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Reserved length in hours, or `None` without a positive end time.
    pub fn duration_hours(&self) -> Option<f64> {
        let end = self.booking_end_time?;
        let hours = (end - self.booking_time).num_milliseconds() as f64 / 3_600_000.0;
        (hours > 0.0).then_some(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(end: Option<DateTime<Utc>>) -> Booking {
        let start = Utc.with_ymd_and_hms(2026, 1, 17, 15, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            customer_name: "Meera".to_string(),
            contact_number: String::new(),
            booking_time: start,
            booking_end_time: end,
            people_count: 2,
            devices: DeviceSelection::new(),
            created_at: start,
        }
    }

    #[test]
    fn test_duration_from_end_time() {
        let end = Utc.with_ymd_and_hms(2026, 1, 17, 16, 45, 0).unwrap();
        assert_eq!(booking(Some(end)).duration_hours(), Some(1.75));
    }

    #[test]
    fn test_duration_missing_without_end() {
        assert_eq!(booking(None).duration_hours(), None);
    }

    #[test]
    fn test_duration_missing_when_end_not_after_start() {
        let end = Utc.with_ymd_and_hms(2026, 1, 17, 14, 0, 0).unwrap();
        assert_eq!(booking(Some(end)).duration_hours(), None);
    }
}
