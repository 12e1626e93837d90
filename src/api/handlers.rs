//! HTTP request handlers for the lounge API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{quote_extension, quote_session};
use crate::error::EngineError;
use crate::lounge::{CreateBookingRequest, CreateSessionRequest, LoungeEvent, UpdateSessionRequest};

use super::request::{AvailabilityWindowQuery, ExtensionRequest, QuoteRequest};
use super::response::{ApiError, ApiErrorResponse, MessageResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(quote_handler))
        .route("/quote/extension", post(quote_extension_handler))
        .route("/availability", get(availability_handler))
        .route("/availability/window", get(availability_window_handler))
        .route(
            "/sessions",
            post(create_session_handler).get(list_sessions_handler),
        )
        .route(
            "/sessions/:id",
            patch(update_session_handler).delete(delete_session_handler),
        )
        .route("/sessions/:id/complete", post(complete_session_handler))
        .route(
            "/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route("/bookings/convert", post(convert_bookings_handler))
        .route("/bookings/:id", delete(delete_booking_handler))
        .route("/events", get(events_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn path_id(correlation_id: Uuid, path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, Response> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid id in path"
        );
        json_response(
            StatusCode::BAD_REQUEST,
            ApiError::with_details("INVALID_ID", "Invalid id", rejection.body_text()),
        )
    })
}

/// Handler for POST /quote.
///
/// Prices a prospective session without touching the store.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let at = request
        .at
        .unwrap_or_else(|| state.config().local_time(Utc::now()));

    let start_time = Instant::now();
    let quote = quote_session(
        request.duration_hours,
        request.people_count,
        &request.devices,
        at,
    );
    info!(
        correlation_id = %correlation_id,
        regime = %quote.regime,
        amount = quote.amount,
        duration_us = start_time.elapsed().as_micros(),
        "Quote completed"
    );
    json_response(StatusCode::OK, quote)
}

/// Handler for POST /quote/extension.
async fn quote_extension_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtensionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing extension quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let at = request
        .at
        .unwrap_or_else(|| state.config().local_time(Utc::now()));
    let extension = quote_extension(
        request.previous_amount,
        request.duration_hours,
        request.people_count,
        &request.devices,
        &request.change,
        at,
    );
    info!(
        correlation_id = %correlation_id,
        charge = extension.charge,
        "Extension quote completed"
    );
    json_response(StatusCode::OK, extension)
}

/// Handler for GET /availability.
async fn availability_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().device_availability() {
        Ok(availability) => json_response(StatusCode::OK, availability),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /availability/window?start=..&end=..
async fn availability_window_handler(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityWindowQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid availability query"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let (Some(start), Some(end)) = (query.start, query.end) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("start and end are required"),
        );
    };

    match state.service().device_availability_between(start, end) {
        Ok(availability) => json_response(StatusCode::OK, availability),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /sessions.
async fn create_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing session start");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().create_session(request, Utc::now()) {
        Ok(session) => json_response(StatusCode::CREATED, session),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /sessions.
async fn list_sessions_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().active_sessions() {
        Ok(sessions) => json_response(StatusCode::OK, sessions),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PATCH /sessions/:id.
async fn update_session_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, session_id = %id, "Processing session update");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().update_session(id, request, Utc::now()) {
        Ok(session) => json_response(StatusCode::OK, session),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /sessions/:id/complete.
async fn complete_session_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.service().complete_session(id, Utc::now()) {
        Ok(session) => json_response(StatusCode::OK, session),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /sessions/:id.
async fn delete_session_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.service().delete_session(id) {
        Ok(()) => json_response(StatusCode::OK, MessageResponse::new("Session deleted")),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /bookings.
async fn create_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().create_booking(request, Utc::now()) {
        Ok(booking) => json_response(StatusCode::CREATED, booking),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /bookings.
async fn list_bookings_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().upcoming_bookings() {
        Ok(bookings) => json_response(StatusCode::OK, bookings),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /bookings/:id.
async fn delete_booking_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.service().delete_booking(id) {
        Ok(()) => json_response(StatusCode::OK, MessageResponse::new("Booking deleted")),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /bookings/convert.
///
/// Runs one conversion pass immediately, as the scheduler would.
async fn convert_bookings_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().convert_due_bookings(Utc::now()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                converted = report.converted,
                "Booking conversion pass completed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /events.
///
/// Upgrades to a WebSocket that receives every floor event as a JSON text
/// frame.
async fn events_handler(
    State(state): State<AppState>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Some(events) = state.subscribe_events() else {
        return json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::new("EVENTS_UNAVAILABLE", "Event stream is not enabled"),
        );
    };

    match upgrade {
        Ok(upgrade) => {
            upgrade.on_upgrade(move |socket| stream_events(socket, events, correlation_id))
        }
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Event stream requires a WebSocket upgrade"
            );
            json_response(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "WEBSOCKET_REQUIRED",
                    "Event stream requires a WebSocket upgrade",
                    rejection.body_text(),
                ),
            )
        }
    }
}

async fn stream_events(
    socket: WebSocket,
    mut events: broadcast::Receiver<LoungeEvent>,
    correlation_id: Uuid,
) {
    let (mut sender, mut receiver) = socket.split();
    info!(correlation_id = %correlation_id, "Event subscriber connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let Ok(payload) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if sender.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(correlation_id = %correlation_id, skipped, "Event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            message = receiver.next() => match message {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => debug!(correlation_id = %correlation_id, "Ignoring inbound frame"),
            },
        }
    }

    info!(correlation_id = %correlation_id, "Event subscriber disconnected");
}
