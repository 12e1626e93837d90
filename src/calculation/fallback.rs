//! Flat per-person fallback rate.
//!
//! Applies only when no regime matched and nothing has been charged yet
//! for a session that has at least one machine selected.

use crate::models::{DeviceSelection, FallbackCharge};

/// Rate per person per hour.
pub const FALLBACK_RATE_PER_PERSON_HOUR: f64 = 50.0;

/// Returns the fallback charge, or `None` if the running total is non-zero
/// or no machine is selected.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::fallback_price;
/// use lounge_engine::models::{DeviceSelection, DeviceType};
///
/// let devices = DeviceSelection::new().with(DeviceType::Pc, vec![1]);
/// let charge = fallback_price(1.0, 2, 0.0, &devices).unwrap();
/// assert_eq!(charge.amount, 100.0);
///
/// assert!(fallback_price(1.0, 2, 0.0, &DeviceSelection::new()).is_none());
/// assert!(fallback_price(1.0, 2, 180.0, &devices).is_none());
/// ```
pub fn fallback_price(
    duration_hours: f64,
    people_count: i64,
    running_total: f64,
    devices: &DeviceSelection,
) -> Option<FallbackCharge> {
    if running_total != 0.0 || devices.is_empty() {
        return None;
    }

    let amount = duration_hours * people_count as f64 * FALLBACK_RATE_PER_PERSON_HOUR;
    Some(FallbackCharge {
        hours: duration_hours,
        people: people_count,
        rate: FALLBACK_RATE_PER_PERSON_HOUR,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceType;

    #[test]
    fn test_ignores_device_mix() {
        let devices = DeviceSelection::new()
            .with(DeviceType::Ps, vec![1, 2])
            .with(DeviceType::Wheel, vec![1]);
        let charge = fallback_price(2.0, 5, 0.0, &devices).unwrap();
        assert_eq!(charge.amount, 500.0);
    }

    #[test]
    fn test_fractional_hours() {
        let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
        let charge = fallback_price(1.5, 3, 0.0, &devices).unwrap();
        assert_eq!(charge.amount, 225.0);
    }

    #[test]
    fn test_negative_inputs_are_not_clamped() {
        let devices = DeviceSelection::new().with(DeviceType::Pc, vec![1]);
        let charge = fallback_price(1.0, -2, 0.0, &devices).unwrap();
        assert_eq!(charge.amount, -100.0);
    }
}
