//! Seating people across the selected machines.
//!
//! Every single-seat machine (PC, VR, wheel, MetaBat) takes exactly one
//! person, whether or not the headcount covers it. Whoever is left is spread
//! across the PS consoles as evenly as possible, earlier consoles taking the
//! extra person. No validation happens here; a headcount smaller than the
//! number of machines simply leaves consoles empty.

use serde::{Deserialize, Serialize};

use crate::models::{DeviceSelection, DeviceType};

/// How a headcount was seated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleAllocation {
    /// People seated on single-seat machines (one per machine).
    pub single_seat_people: u32,
    /// People left over for the PS consoles.
    pub ps_people: u64,
    /// Occupants per selected PS console, in selection order.
    pub ps_occupants: Vec<u64>,
}

impl PeopleAllocation {
    /// Returns true if some selected console has nobody on it.
    pub fn has_idle_console(&self) -> bool {
        self.ps_occupants.contains(&0)
    }
}

/// Seats `people_count` people on the machines in `devices`.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::allocate_people;
/// use lounge_engine::models::{DeviceSelection, DeviceType};
///
/// let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1, 2]);
/// assert_eq!(allocate_people(5, &devices).ps_occupants, vec![3, 2]);
/// assert_eq!(allocate_people(4, &devices).ps_occupants, vec![2, 2]);
///
/// // The PC takes the only person; the console is left empty.
/// let devices = DeviceSelection::new()
///     .with(DeviceType::Pc, vec![1])
///     .with(DeviceType::Ps, vec![1]);
/// assert_eq!(allocate_people(1, &devices).ps_occupants, vec![0]);
/// ```
pub fn allocate_people(people_count: i64, devices: &DeviceSelection) -> PeopleAllocation {
    let single_seat_people = devices.single_seat_count();
    let remaining = people_count
        .saturating_sub(i64::from(single_seat_people))
        .max(0);
    let ps_people = remaining.unsigned_abs();

    let consoles = u64::from(devices.count(DeviceType::Ps));
    let ps_occupants = if consoles == 0 {
        Vec::new()
    } else {
        let base = ps_people / consoles;
        let remainder = ps_people % consoles;
        (0..consoles)
            .map(|index| if index < remainder { base + 1 } else { base })
            .collect()
    };

    PeopleAllocation {
        single_seat_people,
        ps_people,
        ps_occupants,
    }
}
