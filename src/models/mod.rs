//! Core data models for the lounge engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod device;
mod quote;
mod session;

pub use booking::Booking;
pub use device::{DeviceSelection, DeviceType, DeviceValue};
pub use quote::{
    AuditStep, AuditTrace, AuditWarning, ExtensionQuote, FallbackCharge, PriceLine, PriceQuote,
    PricingRegime, RateCard,
};
pub use session::{Member, Session, SessionStatus};
