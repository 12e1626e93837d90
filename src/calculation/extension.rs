//! Extending a running session.
//!
//! Adding time or people re-prices the session as it will stand after the
//! change and charges the difference against what was already billed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{DeviceSelection, ExtensionQuote};

use super::session_price::{quote_session, round_money};

/// A change to a running session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionChange {
    /// Additional hours of play.
    #[serde(default)]
    pub extra_hours: f64,
    /// People joining.
    #[serde(default)]
    pub added_people: i64,
    /// Machines the new people take.
    #[serde(default)]
    pub added_devices: DeviceSelection,
}

/// Quotes the additional charge for `change`.
///
/// The charge is `max(0, new_total - previous_amount)`: shrinking a session
/// never produces a refund here.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::{quote_extension, SessionChange};
/// use lounge_engine::models::{DeviceSelection, DeviceType};
/// use chrono::NaiveDateTime;
///
/// // Tuesday 16:00 (Normal Hour): a solo console hour was billed 140.
/// let at = NaiveDateTime::parse_from_str("2026-01-13 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
/// let change = SessionChange { extra_hours: 0.5, ..Default::default() };
///
/// let extension = quote_extension(140.0, 1.0, 1, &devices, &change, at);
/// assert_eq!(extension.quote.amount, 180.0);
/// assert_eq!(extension.charge, 40.0);
/// ```
pub fn quote_extension(
    previous_amount: f64,
    duration_hours: f64,
    people_count: i64,
    devices: &DeviceSelection,
    change: &SessionChange,
    at: NaiveDateTime,
) -> ExtensionQuote {
    let merged = devices.merge(&change.added_devices);
    let quote = quote_session(
        duration_hours + change.extra_hours,
        people_count.saturating_add(change.added_people),
        &merged,
        at,
    );
    let charge = (quote.amount - previous_amount).max(0.0);

    ExtensionQuote {
        previous_amount,
        charge,
        display_charge: round_money(charge, 0),
        quote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceType, PricingRegime};
    use rust_decimal::Decimal;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_new_member_with_own_pc() {
        let at = make_datetime("2026-01-13", "22:00:00");
        let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
        let change = SessionChange {
            extra_hours: 0.0,
            added_people: 1,
            added_devices: DeviceSelection::new().with(DeviceType::Pc, vec![4]),
        };

        // Fun Night: console solo 100 before and after, PC adds 50.
        let extension = quote_extension(100.0, 1.0, 1, &devices, &change, at);
        assert_eq!(extension.quote.regime, PricingRegime::FunNight);
        assert_eq!(extension.quote.ps_occupants, vec![1]);
        assert_eq!(extension.charge, 50.0);
        assert_eq!(extension.display_charge, Decimal::new(50, 0));
    }

    #[test]
    fn test_joining_a_console_reprices_the_split() {
        let at = make_datetime("2026-01-13", "16:00:00");
        let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
        let change = SessionChange {
            extra_hours: 0.0,
            added_people: 1,
            added_devices: DeviceSelection::new(),
        };

        // Normal Hour: solo 140, pair 120. The new total is lower; no refund.
        let extension = quote_extension(140.0, 1.0, 1, &devices, &change, at);
        assert_eq!(extension.quote.amount, 120.0);
        assert_eq!(extension.charge, 0.0);
    }

    #[test]
    fn test_added_people_saturate_headcount() {
        let at = make_datetime("2026-01-13", "10:00:00");
        let devices = DeviceSelection::new().with(DeviceType::Pc, vec![1]);
        let change = SessionChange {
            added_people: i64::MAX,
            ..Default::default()
        };

        let extension = quote_extension(0.0, 0.25, i64::MAX, &devices, &change, at);
        assert_eq!(extension.quote.people_count, i64::MAX);
        assert_eq!(extension.quote.amount, 40.0);
    }

    #[test]
    fn test_previous_amount_may_include_snacks() {
        let at = make_datetime("2026-01-13", "10:00:00");
        let devices = DeviceSelection::new().with(DeviceType::Pc, vec![1]);
        let change = SessionChange {
            extra_hours: 1.0,
            ..Default::default()
        };

        // Happy Hour PC: 2 hours = 50 + 2 x 30 = 110. Billed 50 + 80 of snacks.
        let extension = quote_extension(130.0, 1.0, 1, &devices, &change, at);
        assert_eq!(extension.quote.amount, 110.0);
        assert_eq!(extension.charge, 0.0);
    }
}
