//! HTTP API module for the lounge engine.
//!
//! This module provides the REST endpoints for quoting prices, checking
//! machine availability, and running sessions and bookings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AvailabilityWindowQuery, ExtensionRequest, QuoteRequest};
pub use response::{ApiError, ApiErrorResponse, MessageResponse};
pub use state::AppState;
