//! Normal Hour rate table.
//!
//! | Device | Price                                                          |
//! |--------|----------------------------------------------------------------|
//! | Wheel  | 90 up to 30 min, else 150 + 75 per extra half hour             |
//! | PC     | 50/hour beyond 3 hours, else 60 + 40 per extra half hour       |
//! | PS     | 140 solo, 120 for two, 50 x p otherwise; + 40 x p per block    |
//!
//! PS consoles have no short-session price here: even a 20 minute game is
//! charged the full first-hour base.

use crate::models::{DeviceSelection, DeviceType, PriceLine, RateCard};

use super::price_lines::{console_lines, duration_minutes, extra_half_hour_blocks, group_line};
use super::PeopleAllocation;

/// Wheel price shared by Normal Hour and Fun Night.
pub fn evening_wheel_price(duration_minutes: f64) -> f64 {
    if duration_minutes <= 30.0 {
        return 90.0;
    }
    150.0 + extra_half_hour_blocks(duration_minutes) * 75.0
}

/// Normal Hour price of one PC.
pub fn normal_hour_pc_price(duration_hours: f64) -> f64 {
    if duration_hours > 3.0 {
        return 50.0 * duration_hours;
    }
    60.0 + extra_half_hour_blocks(duration_minutes(duration_hours)) * 40.0
}

/// Normal Hour price of one console seating `people`.
pub fn normal_hour_console_price(duration_minutes: f64, people: u64) -> f64 {
    let per_head = people as f64;
    let base = match people {
        1 => 140.0,
        2 => 120.0,
        _ => 50.0 * per_head,
    };
    base + extra_half_hour_blocks(duration_minutes) * 40.0 * per_head
}

/// Price lines for wheel, PC and PS under Normal Hour, in that order.
pub fn price_normal_hour(
    duration_hours: f64,
    allocation: &PeopleAllocation,
    devices: &DeviceSelection,
) -> Vec<PriceLine> {
    let minutes = duration_minutes(duration_hours);

    let mut lines: Vec<PriceLine> = Vec::new();
    lines.extend(group_line(
        devices,
        DeviceType::Wheel,
        RateCard::NormalHour,
        evening_wheel_price(minutes),
    ));
    lines.extend(group_line(
        devices,
        DeviceType::Pc,
        RateCard::NormalHour,
        normal_hour_pc_price(duration_hours),
    ));
    lines.extend(console_lines(
        devices,
        allocation,
        RateCard::NormalHour,
        |people| normal_hour_console_price(minutes, people),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::allocate_people;

    #[test]
    fn test_wheel_prices() {
        assert_eq!(evening_wheel_price(30.0), 90.0);
        assert_eq!(evening_wheel_price(45.0), 150.0);
        assert_eq!(evening_wheel_price(120.0), 300.0);
    }

    #[test]
    fn test_pc_block_pricing_up_to_three_hours() {
        assert_eq!(normal_hour_pc_price(0.5), 60.0);
        assert_eq!(normal_hour_pc_price(1.0), 60.0);
        assert_eq!(normal_hour_pc_price(1.5), 100.0);
        assert_eq!(normal_hour_pc_price(3.0), 220.0);
    }

    #[test]
    fn test_pc_hourly_beyond_three_hours() {
        assert_eq!(normal_hour_pc_price(3.5), 175.0);
        assert_eq!(normal_hour_pc_price(4.0), 200.0);
    }

    #[test]
    fn test_console_base_by_headcount() {
        assert_eq!(normal_hour_console_price(60.0, 1), 140.0);
        assert_eq!(normal_hour_console_price(60.0, 2), 120.0);
        assert_eq!(normal_hour_console_price(60.0, 3), 150.0);
        assert_eq!(normal_hour_console_price(60.0, 4), 200.0);
    }

    #[test]
    fn test_console_has_no_short_session_price() {
        assert_eq!(normal_hour_console_price(15.0, 1), 140.0);
    }

    #[test]
    fn test_console_extra_blocks_per_head() {
        assert_eq!(normal_hour_console_price(90.0, 2), 200.0);
        assert_eq!(normal_hour_console_price(150.0, 1), 260.0);
    }

    #[test]
    fn test_line_order_is_wheel_pc_ps() {
        let devices = DeviceSelection::new()
            .with(DeviceType::Ps, vec![2])
            .with(DeviceType::Pc, vec![1])
            .with(DeviceType::Wheel, vec![1]);
        let allocation = allocate_people(3, &devices);
        let lines = price_normal_hour(1.0, &allocation, &devices);

        let order: Vec<_> = lines.iter().map(|l| l.device).collect();
        assert_eq!(order, vec![DeviceType::Wheel, DeviceType::Pc, DeviceType::Ps]);
        let total: f64 = lines.iter().map(|l| l.amount).sum();
        assert_eq!(total, 150.0 + 60.0 + 140.0);
    }
}
