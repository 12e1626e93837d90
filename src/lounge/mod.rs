//! Front-desk services: sessions, bookings, availability and push events.
//!
//! Persistence and push notifications are injected through the
//! [`LoungeStore`] and [`NotificationPublisher`] traits so the service can
//! run against an in-process store in tests and a real backend in
//! production.

mod notifier;
mod scheduler;
mod service;
mod store;

pub use notifier::{BroadcastPublisher, LoungeEvent, NotificationPublisher, NullPublisher};
pub use scheduler::spawn_booking_scheduler;
pub use service::{
    Conversion, ConversionReport, CreateBookingRequest, CreateSessionRequest, DeviceAvailability,
    LoungeService, UpcomingBooking, UpdateSessionRequest, coerce_duration, coerce_people,
};
pub use store::{InMemoryStore, LoungeStore};
