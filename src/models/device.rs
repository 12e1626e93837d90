//! Device types and machine selections.
//!
//! A [`DeviceSelection`] is what the pricing engine consumes: for each device
//! type, the ordered list of machine IDs picked for a session. Older records
//! store a single machine number per type instead of a list; that shape is
//! accepted only at the deserialization boundary through [`DeviceValue`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of device types in the lounge.
///
/// # Example
///
/// ```
/// use lounge_engine::models::DeviceType;
///
/// assert_eq!(DeviceType::Ps.as_str(), "ps");
/// assert_eq!(DeviceType::Ps.to_string(), "PS");
/// assert!(!DeviceType::Ps.is_single_seat());
/// assert!(DeviceType::Wheel.is_single_seat());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// PlayStation console, shared by one or more players.
    Ps,
    /// Gaming PC.
    Pc,
    /// VR headset.
    Vr,
    /// Racing wheel rig.
    Wheel,
    /// MetaBat cricket simulator.
    Metabat,
}

impl DeviceType {
    /// Every device type, in storage key order.
    pub const ALL: [DeviceType; 5] = [
        DeviceType::Ps,
        DeviceType::Pc,
        DeviceType::Vr,
        DeviceType::Wheel,
        DeviceType::Metabat,
    ];

    /// Returns the lowercase key used in requests and stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Ps => "ps",
            DeviceType::Pc => "pc",
            DeviceType::Vr => "vr",
            DeviceType::Wheel => "wheel",
            DeviceType::Metabat => "metabat",
        }
    }

    /// Returns true for devices that always seat exactly one person.
    pub fn is_single_seat(&self) -> bool {
        !matches!(self, DeviceType::Ps)
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A device entry as it appears in requests and historical records.
///
/// Current clients send an array of machine IDs. Legacy records hold a
/// single number, which is the machine ID itself (`{"ps": 3}` is PS #3);
/// zero or negative numbers mean no machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceValue {
    /// Explicit list of machine IDs.
    Ids(Vec<u32>),
    /// Legacy single machine number.
    Legacy(i64),
    /// `null` in the source document.
    Absent,
}

impl DeviceValue {
    /// Normalizes the value to a list of machine IDs.
    pub fn into_ids(self) -> Vec<u32> {
        match self {
            DeviceValue::Ids(ids) => ids,
            DeviceValue::Legacy(id) if id > 0 => u32::try_from(id).map(|id| vec![id]).unwrap_or_default(),
            DeviceValue::Legacy(_) | DeviceValue::Absent => Vec::new(),
        }
    }
}

/// The machines selected for a session, keyed by device type.
///
/// Only the number of IDs per type matters for pricing; the IDs themselves
/// are used for occupancy checks. Missing types are treated as empty.
///
/// Deserializing accepts both the current ID-array shape and the legacy
/// single-number shape; serializing always writes ID arrays.
///
/// # Example
///
/// ```
/// use lounge_engine::models::{DeviceSelection, DeviceType};
///
/// let legacy: DeviceSelection = serde_json::from_str(r#"{"ps": 3, "pc": 0}"#).unwrap();
/// assert_eq!(legacy.ids(DeviceType::Ps), &[3]);
/// assert_eq!(legacy.count(DeviceType::Pc), 0);
///
/// let current = DeviceSelection::new()
///     .with(DeviceType::Ps, vec![1, 2])
///     .with(DeviceType::Vr, vec![1]);
/// assert_eq!(current.total_machines(), 3);
/// assert_eq!(current.single_seat_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DeviceType, DeviceValue>",
    into = "BTreeMap<DeviceType, Vec<u32>>"
)]
pub struct DeviceSelection {
    machines: BTreeMap<DeviceType, Vec<u32>>,
}

impl DeviceSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selection with `ids` set for `device`.
    pub fn with(mut self, device: DeviceType, ids: Vec<u32>) -> Self {
        self.set(device, ids);
        self
    }

    /// Sets the machine IDs for `device`, replacing any previous list.
    pub fn set(&mut self, device: DeviceType, ids: Vec<u32>) {
        if ids.is_empty() {
            self.machines.remove(&device);
        } else {
            self.machines.insert(device, ids);
        }
    }

    /// Returns the machine IDs selected for `device`, in selection order.
    pub fn ids(&self, device: DeviceType) -> &[u32] {
        self.machines
            .get(&device)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns how many machines of `device` are selected.
    pub fn count(&self, device: DeviceType) -> u32 {
        self.ids(device).len() as u32
    }

    /// Number of selected PC, VR, wheel and MetaBat machines.
    pub fn single_seat_count(&self) -> u32 {
        DeviceType::ALL
            .iter()
            .filter(|device| device.is_single_seat())
            .map(|device| self.count(*device))
            .sum()
    }

    /// Number of selected machines across all device types.
    pub fn total_machines(&self) -> u32 {
        DeviceType::ALL.iter().map(|device| self.count(*device)).sum()
    }

    /// Returns true when no machine of any type is selected.
    pub fn is_empty(&self) -> bool {
        self.total_machines() == 0
    }

    /// Iterates over `(device, machine_id)` pairs in key then selection order.
    pub fn machines(&self) -> impl Iterator<Item = (DeviceType, u32)> + '_ {
        self.machines
            .iter()
            .flat_map(|(device, ids)| ids.iter().map(move |id| (*device, *id)))
    }

    /// Returns a new selection with `other`'s machines appended per type.
    pub fn merge(&self, other: &DeviceSelection) -> DeviceSelection {
        let mut merged = self.clone();
        for (device, ids) in &other.machines {
            merged
                .machines
                .entry(*device)
                .or_default()
                .extend(ids.iter().copied());
        }
        merged
    }
}

impl From<BTreeMap<DeviceType, DeviceValue>> for DeviceSelection {
    fn from(raw: BTreeMap<DeviceType, DeviceValue>) -> Self {
        let mut selection = DeviceSelection::new();
        for (device, value) in raw {
            selection.set(device, value.into_ids());
        }
        selection
    }
}

impl From<DeviceSelection> for BTreeMap<DeviceType, Vec<u32>> {
    fn from(selection: DeviceSelection) -> Self {
        selection.machines
    }
}
