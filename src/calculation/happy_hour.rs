//! Happy Hour rate table.
//!
//! Up to 30 minutes everything is a flat short-session price. Past that, a
//! first-hour base applies and every started half hour beyond the first
//! hour adds a block charge.
//!
//! | Device | <= 30 min    | Base (first hour)   | Per extra half hour |
//! |--------|--------------|---------------------|---------------------|
//! | PS     | 40 x people  | 90 solo, else 45 x p | 30 x people        |
//! | PC     | 40           | 50                  | 30                  |
//! | Wheel  | 80           | 120                 | 60                  |

use crate::models::{DeviceSelection, DeviceType, PriceLine, RateCard};

use super::price_lines::{console_lines, duration_minutes, extra_half_hour_blocks, group_line};
use super::PeopleAllocation;

/// Happy Hour price of one console seating `people`.
pub fn happy_hour_console_price(duration_minutes: f64, people: u64) -> f64 {
    let per_head = people as f64;
    if duration_minutes <= 30.0 {
        return 40.0 * per_head;
    }
    let base = if people == 1 { 90.0 } else { 45.0 * per_head };
    base + extra_half_hour_blocks(duration_minutes) * 30.0 * per_head
}

/// Happy Hour price of one PC.
pub fn happy_hour_pc_price(duration_minutes: f64) -> f64 {
    if duration_minutes <= 30.0 {
        return 40.0;
    }
    50.0 + extra_half_hour_blocks(duration_minutes) * 30.0
}

/// Happy Hour price of one racing wheel.
pub fn happy_hour_wheel_price(duration_minutes: f64) -> f64 {
    if duration_minutes <= 30.0 {
        return 80.0;
    }
    120.0 + extra_half_hour_blocks(duration_minutes) * 60.0
}

/// Price lines for PS, PC and wheel under Happy Hour, in that order.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::{allocate_people, price_happy_hour};
/// use lounge_engine::models::{DeviceSelection, DeviceType};
///
/// // 3 people on one PS for 90 minutes: 45 x 3 + 1 block x 30 x 3
/// let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
/// let lines = price_happy_hour(1.5, &allocate_people(3, &devices), &devices);
/// assert_eq!(lines[0].amount, 225.0);
/// ```
pub fn price_happy_hour(
    duration_hours: f64,
    allocation: &PeopleAllocation,
    devices: &DeviceSelection,
) -> Vec<PriceLine> {
    let minutes = duration_minutes(duration_hours);

    let mut lines = console_lines(devices, allocation, RateCard::HappyHour, |people| {
        happy_hour_console_price(minutes, people)
    });
    lines.extend(group_line(
        devices,
        DeviceType::Pc,
        RateCard::HappyHour,
        happy_hour_pc_price(minutes),
    ));
    lines.extend(group_line(
        devices,
        DeviceType::Wheel,
        RateCard::HappyHour,
        happy_hour_wheel_price(minutes),
    ));
    lines
}
