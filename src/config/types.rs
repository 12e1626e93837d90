//! Configuration types for the lounge.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::DeviceType;

fn default_session_hours() -> f64 {
    1.0
}

fn default_conversion_window() -> i64 {
    60
}

fn default_scan_interval() -> u64 {
    30
}

/// Lounge metadata and operating parameters from `lounge.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoungeMetadata {
    /// Display name of the lounge.
    pub name: String,
    /// ISO currency code prices are quoted in.
    pub currency: String,
    /// Offset of the lounge's wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Session length used when a request gives none.
    #[serde(default = "default_session_hours")]
    pub default_session_hours: f64,
    /// How late after its start a booking may still be auto-converted.
    #[serde(default = "default_conversion_window")]
    pub booking_conversion_window_seconds: i64,
    /// How often the booking scheduler scans for due bookings.
    #[serde(default = "default_scan_interval")]
    pub booking_scan_interval_seconds: u64,
}

/// Machine inventory from `devices.yaml`.
///
/// Machine IDs run from 1 to the limit for each type. A type missing from
/// the file has no machines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceLimits {
    /// Number of machines per device type.
    pub limits: BTreeMap<DeviceType, u32>,
}

impl DeviceLimits {
    /// Returns the number of machines of `device`.
    pub fn limit(&self, device: DeviceType) -> u32 {
        self.limits.get(&device).copied().unwrap_or(0)
    }

    /// Returns true if `machine_id` names a machine of `device`.
    pub fn contains(&self, device: DeviceType, machine_id: u32) -> bool {
        (1..=self.limit(device)).contains(&machine_id)
    }
}

/// The complete lounge configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct LoungeConfig {
    metadata: LoungeMetadata,
    devices: DeviceLimits,
}

impl LoungeConfig {
    /// Creates a new LoungeConfig from its component parts.
    pub fn new(metadata: LoungeMetadata, devices: DeviceLimits) -> Self {
        Self { metadata, devices }
    }

    /// Returns the lounge metadata.
    pub fn lounge(&self) -> &LoungeMetadata {
        &self.metadata
    }

    /// Returns the machine inventory.
    pub fn devices(&self) -> &DeviceLimits {
        &self.devices
    }

    /// Converts an instant to the lounge's local wall-clock time.
    ///
    /// An out-of-range offset falls back to UTC.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match FixedOffset::east_opt(self.metadata.utc_offset_minutes * 60) {
            Some(offset) => instant.with_timezone(&offset).naive_local(),
            None => instant.naive_utc(),
        }
    }
}
