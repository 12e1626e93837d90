//! Pricing logic for the lounge engine.
//!
//! This module contains the pure pricing core: regime detection from local
//! time, seating people across the selected machines, the VR/MetaBat tiered
//! rate, the Happy Hour, Normal Hour and Fun Night rate tables, the flat
//! per-person fallback, and the extension quote for running sessions.
//!
//! Nothing here performs I/O or keeps state between calls.

mod extension;
mod fallback;
mod flat_rate;
mod fun_night;
mod happy_hour;
mod normal_hour;
mod people_allocation;
mod price_lines;
mod session_price;
mod time_classifier;

pub use extension::{SessionChange, quote_extension};
pub use fallback::{FALLBACK_RATE_PER_PERSON_HOUR, fallback_price};
pub use flat_rate::{FLAT_RATE_HOURLY, flat_rate_per_machine, price_flat_rate_devices};
pub use fun_night::{fun_night_console_price, fun_night_pc_price, price_fun_night};
pub use happy_hour::{
    happy_hour_console_price, happy_hour_pc_price, happy_hour_wheel_price, price_happy_hour,
};
pub use normal_hour::{
    evening_wheel_price, normal_hour_console_price, normal_hour_pc_price, price_normal_hour,
};
pub use people_allocation::{PeopleAllocation, allocate_people};
pub use price_lines::{duration_minutes, extra_half_hour_blocks};
pub use session_price::{calculate_session_price, quote_session, round_money};
pub use time_classifier::{
    RegimeFlags, classify, is_fun_night, is_happy_hour, is_normal_hour, is_weekend,
};
