//! Shared building blocks for the rate tables.

use crate::models::{DeviceSelection, DeviceType, PriceLine, RateCard};

use super::PeopleAllocation;

/// Converts a session length in hours to minutes.
pub fn duration_minutes(duration_hours: f64) -> f64 {
    duration_hours * 60.0
}

/// Number of started half-hour blocks beyond the first hour.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::extra_half_hour_blocks;
///
/// assert_eq!(extra_half_hour_blocks(45.0), 0.0);
/// assert_eq!(extra_half_hour_blocks(60.0), 0.0);
/// assert_eq!(extra_half_hour_blocks(61.0), 1.0);
/// assert_eq!(extra_half_hour_blocks(90.0), 1.0);
/// assert_eq!(extra_half_hour_blocks(91.0), 2.0);
/// ```
pub fn extra_half_hour_blocks(duration_minutes: f64) -> f64 {
    ((duration_minutes - 60.0).max(0.0) / 30.0).ceil()
}

/// One line covering every machine of `device`, or `None` if none are selected.
pub(crate) fn group_line(
    devices: &DeviceSelection,
    device: DeviceType,
    rate_card: RateCard,
    unit_price: f64,
) -> Option<PriceLine> {
    let machines = devices.count(device);
    if machines == 0 {
        return None;
    }

    Some(PriceLine {
        device,
        rate_card,
        machine_id: None,
        machines,
        occupants: 1,
        unit_price,
        amount: unit_price * f64::from(machines),
    })
}

/// One line per occupied console, priced by `console_price(occupants)`.
///
/// Empty consoles contribute nothing and get no line.
pub(crate) fn console_lines(
    devices: &DeviceSelection,
    allocation: &PeopleAllocation,
    rate_card: RateCard,
    console_price: impl Fn(u64) -> f64,
) -> Vec<PriceLine> {
    devices
        .ids(DeviceType::Ps)
        .iter()
        .zip(&allocation.ps_occupants)
        .filter(|(_, occupants)| **occupants > 0)
        .map(|(machine_id, occupants)| {
            let amount = console_price(*occupants);
            PriceLine {
                device: DeviceType::Ps,
                rate_card,
                machine_id: Some(*machine_id),
                machines: 1,
                occupants: *occupants,
                unit_price: amount,
                amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::allocate_people;

    #[test]
    fn test_blocks_round_up_partial_half_hours() {
        assert_eq!(extra_half_hour_blocks(120.0), 2.0);
        assert_eq!(extra_half_hour_blocks(121.0), 3.0);
        assert_eq!(extra_half_hour_blocks(75.5), 1.0);
    }

    #[test]
    fn test_blocks_never_negative() {
        assert_eq!(extra_half_hour_blocks(0.0), 0.0);
        assert_eq!(extra_half_hour_blocks(-90.0), 0.0);
    }

    #[test]
    fn test_group_line_multiplies_by_machine_count() {
        let devices = DeviceSelection::new().with(DeviceType::Pc, vec![1, 4, 6]);
        let line = group_line(&devices, DeviceType::Pc, RateCard::NormalHour, 60.0).unwrap();
        assert_eq!(line.machines, 3);
        assert_eq!(line.amount, 180.0);
    }

    #[test]
    fn test_group_line_absent_without_machines() {
        let devices = DeviceSelection::new();
        assert!(group_line(&devices, DeviceType::Wheel, RateCard::FunNight, 90.0).is_none());
    }

    #[test]
    fn test_console_lines_skip_empty_consoles() {
        let devices = DeviceSelection::new().with(DeviceType::Ps, vec![3, 5, 7]);
        let allocation = allocate_people(2, &devices);
        let lines = console_lines(&devices, &allocation, RateCard::HappyHour, |p| 40.0 * p as f64);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].machine_id, Some(3));
        assert_eq!(lines[1].machine_id, Some(5));
        assert!(lines.iter().all(|l| l.occupants == 1 && l.amount == 40.0));
    }
}
