//! Fun Night rate table (21:00 to 05:59).
//!
//! Wheels cost the same as in Normal Hour. PCs and consoles are cheaper:
//! PC 50 + 30 per extra half hour (50/hour beyond 3 hours), console 100 solo
//! or 50 per head, plus 30 per head per extra half hour.

use crate::models::{DeviceSelection, DeviceType, PriceLine, RateCard};

use super::normal_hour::evening_wheel_price;
use super::price_lines::{console_lines, duration_minutes, extra_half_hour_blocks, group_line};
use super::PeopleAllocation;

/// Fun Night price of one PC.
pub fn fun_night_pc_price(duration_hours: f64) -> f64 {
    if duration_hours > 3.0 {
        return 50.0 * duration_hours;
    }
    50.0 + extra_half_hour_blocks(duration_minutes(duration_hours)) * 30.0
}

/// Fun Night price of one console seating `people`.
pub fn fun_night_console_price(duration_minutes: f64, people: u64) -> f64 {
    let per_head = people as f64;
    let base = if people == 1 { 100.0 } else { 50.0 * per_head };
    base + extra_half_hour_blocks(duration_minutes) * 30.0 * per_head
}

/// Price lines for wheel, PC and PS under Fun Night, in that order.
pub fn price_fun_night(
    duration_hours: f64,
    allocation: &PeopleAllocation,
    devices: &DeviceSelection,
) -> Vec<PriceLine> {
    let minutes = duration_minutes(duration_hours);

    let mut lines: Vec<PriceLine> = Vec::new();
    lines.extend(group_line(
        devices,
        DeviceType::Wheel,
        RateCard::FunNight,
        evening_wheel_price(minutes),
    ));
    lines.extend(group_line(
        devices,
        DeviceType::Pc,
        RateCard::FunNight,
        fun_night_pc_price(duration_hours),
    ));
    lines.extend(console_lines(
        devices,
        allocation,
        RateCard::FunNight,
        |people| fun_night_console_price(minutes, people),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::allocate_people;

    #[test]
    fn test_pc_prices() {
        assert_eq!(fun_night_pc_price(1.0), 50.0);
        assert_eq!(fun_night_pc_price(2.0), 110.0);
        assert_eq!(fun_night_pc_price(3.0), 170.0);
        assert_eq!(fun_night_pc_price(5.0), 250.0);
    }

    #[test]
    fn test_console_prices() {
        assert_eq!(fun_night_console_price(60.0, 1), 100.0);
        assert_eq!(fun_night_console_price(60.0, 2), 100.0);
        assert_eq!(fun_night_console_price(60.0, 3), 150.0);
        assert_eq!(fun_night_console_price(120.0, 3), 330.0);
    }

    #[test]
    fn test_two_wheels_for_forty_minutes() {
        let devices = DeviceSelection::new().with(DeviceType::Wheel, vec![1, 2]);
        let allocation = allocate_people(2, &devices);
        let lines = price_fun_night(40.0 / 60.0, &allocation, &devices);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price, 150.0);
        assert_eq!(lines[0].amount, 300.0);
    }

    #[test]
    fn test_empty_console_is_free() {
        let devices = DeviceSelection::new()
            .with(DeviceType::Pc, vec![1])
            .with(DeviceType::Ps, vec![1]);
        let allocation = allocate_people(1, &devices);
        let lines = price_fun_night(1.0, &allocation, &devices);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].device, DeviceType::Pc);
    }
}
