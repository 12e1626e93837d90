//! VR and MetaBat pricing.
//!
//! These machines are charged on a tiered rate that ignores the time of
//! day: 50 up to 15 minutes, 100 up to 30, 180 up to an hour, then 180 per
//! hour pro-rated. Each machine seats one person.

use crate::models::{DeviceSelection, DeviceType, PriceLine, RateCard};

use super::price_lines::group_line;

/// Hourly rate once a VR/MetaBat session runs past an hour.
pub const FLAT_RATE_HOURLY: f64 = 180.0;

/// Price of one VR or MetaBat machine for `duration_minutes`.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::flat_rate_per_machine;
///
/// assert_eq!(flat_rate_per_machine(15.0), 50.0);
/// assert_eq!(flat_rate_per_machine(20.0), 100.0);
/// assert_eq!(flat_rate_per_machine(60.0), 180.0);
/// assert_eq!(flat_rate_per_machine(90.0), 270.0);
/// ```
pub fn flat_rate_per_machine(duration_minutes: f64) -> f64 {
    if duration_minutes <= 15.0 {
        50.0
    } else if duration_minutes <= 30.0 {
        100.0
    } else if duration_minutes <= 60.0 {
        FLAT_RATE_HOURLY
    } else {
        (duration_minutes / 60.0) * FLAT_RATE_HOURLY
    }
}

/// Price lines for the selected VR headsets and MetaBat rigs, VR first.
pub fn price_flat_rate_devices(duration_minutes: f64, devices: &DeviceSelection) -> Vec<PriceLine> {
    let unit_price = flat_rate_per_machine(duration_minutes);
    [DeviceType::Vr, DeviceType::Metabat]
        .into_iter()
        .filter_map(|device| group_line(devices, device, RateCard::Flat, unit_price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(flat_rate_per_machine(0.0), 50.0);
        assert_eq!(flat_rate_per_machine(15.0), 50.0);
        assert_eq!(flat_rate_per_machine(15.5), 100.0);
        assert_eq!(flat_rate_per_machine(30.0), 100.0);
        assert_eq!(flat_rate_per_machine(31.0), 180.0);
        assert_eq!(flat_rate_per_machine(60.0), 180.0);
    }

    #[test]
    fn test_pro_rated_past_one_hour() {
        assert_eq!(flat_rate_per_machine(120.0), 360.0);
        assert_eq!(flat_rate_per_machine(75.0), 225.0);
    }

    #[test]
    fn test_pro_rating_keeps_fractions() {
        // 1.1 hours is not exact in binary; the result carries the same
        // rounding noise as the double-precision formula.
        let minutes = 1.1 * 60.0;
        assert_eq!(flat_rate_per_machine(minutes), (minutes / 60.0) * 180.0);
        assert!((flat_rate_per_machine(minutes) - 198.0).abs() < 1e-9);
    }

    #[test]
    fn test_lines_for_vr_and_metabat() {
        let devices = DeviceSelection::new()
            .with(DeviceType::Metabat, vec![1])
            .with(DeviceType::Vr, vec![1, 2]);
        let lines = price_flat_rate_devices(20.0, &devices);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].device, DeviceType::Vr);
        assert_eq!(lines[0].amount, 200.0);
        assert_eq!(lines[1].device, DeviceType::Metabat);
        assert_eq!(lines[1].amount, 100.0);
    }

    #[test]
    fn test_other_devices_ignored() {
        let devices = DeviceSelection::new()
            .with(DeviceType::Ps, vec![1])
            .with(DeviceType::Pc, vec![1]);
        assert!(price_flat_rate_devices(60.0, &devices).is_empty());
    }
}
