//! Session pricing and device allocation engine for a gaming lounge.
//!
//! This crate prices play sessions on PlayStation consoles, PCs, VR
//! headsets, racing wheels and MetaBat simulators according to the lounge's
//! time-of-day regimes (Happy Hour, Normal Hour, Fun Night), seats groups
//! across the selected machines, and runs the front-desk workflow around
//! it: sessions with a payment ledger, bookings and their automatic
//! conversion, and machine availability.
//!
//! # Example
//!
//! ```
//! use lounge_engine::calculation::quote_session;
//! use lounge_engine::models::{DeviceSelection, DeviceType, PricingRegime};
//! use chrono::NaiveDateTime;
//!
//! // Saturday 19:00: three friends on one PS and one PC for 1.5 hours.
//! let at = NaiveDateTime::parse_from_str("2026-01-17 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
//! let devices = DeviceSelection::new()
//!     .with(DeviceType::Ps, vec![1])
//!     .with(DeviceType::Pc, vec![1]);
//!
//! let quote = quote_session(1.5, 3, &devices, at);
//! assert_eq!(quote.regime, PricingRegime::Normal);
//! assert_eq!(quote.amount, 300.0);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lounge;
pub mod models;
