//! Session and booking operations for the front desk.
//!
//! [`LoungeService`] ties the pricing engine to the store: it checks machine
//! availability, prices new sessions at the lounge's local time, keeps the
//! payment ledger when sessions are extended, and turns due bookings into
//! sessions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{SessionChange, calculate_session_price, quote_extension, round_money};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, DeviceSelection, DeviceType, Member, Session, SessionStatus};

use super::notifier::{LoungeEvent, NotificationPublisher};
use super::store::LoungeStore;

/// Machine inventory and the IDs currently taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAvailability {
    /// Number of machines per device type.
    pub limits: BTreeMap<DeviceType, u32>,
    /// Taken machine IDs per device type, ascending.
    pub occupied: BTreeMap<DeviceType, Vec<u32>>,
}

impl DeviceAvailability {
    fn from_selections<'a>(
        limits: BTreeMap<DeviceType, u32>,
        selections: impl IntoIterator<Item = &'a DeviceSelection>,
    ) -> Self {
        let mut occupied: BTreeMap<DeviceType, Vec<u32>> =
            DeviceType::ALL.iter().map(|d| (*d, Vec::new())).collect();

        for (device, machine_id) in selections.into_iter().flat_map(|s| s.machines()) {
            let taken = occupied.entry(device).or_default();
            if !taken.contains(&machine_id) {
                taken.push(machine_id);
            }
        }
        for taken in occupied.values_mut() {
            taken.sort_unstable();
        }

        Self { limits, occupied }
    }

    /// Returns true if `machine_id` of `device` is taken.
    pub fn is_occupied(&self, device: DeviceType, machine_id: u32) -> bool {
        self.occupied
            .get(&device)
            .is_some_and(|taken| taken.contains(&machine_id))
    }
}

/// Request to start a session at the counter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Customer the session is registered to.
    pub customer_name: String,
    /// Customer phone number.
    #[serde(default)]
    pub contact_number: String,
    /// Hours of play; missing, zero or non-finite means the default.
    #[serde(default)]
    pub duration_hours: Option<f64>,
    /// Headcount; missing or non-positive means one person.
    #[serde(default)]
    pub people_count: Option<i64>,
    /// Free-text snack order.
    #[serde(default)]
    pub snacks: String,
    /// Machines requested.
    #[serde(default)]
    pub devices: DeviceSelection,
    /// Price agreed at the counter (for example including snacks).
    /// Overrides the engine price when present.
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Ledger update for a running session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    /// Hours added to the session.
    #[serde(default)]
    pub extra_hours: f64,
    /// Amount added to the bill. Computed from the extension quote if absent.
    #[serde(default)]
    pub extra_price: Option<Decimal>,
    /// A group joining the session.
    #[serde(default)]
    pub new_member: Option<Member>,
    /// Payment collected now.
    #[serde(default)]
    pub paid_now: Decimal,
    /// People who settled their share with this payment.
    #[serde(default)]
    pub paying_people_now: u32,
}

/// Request to reserve machines for later.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    /// Customer the booking is for.
    pub customer_name: String,
    /// Customer phone number.
    #[serde(default)]
    pub contact_number: String,
    /// Reserved start.
    pub booking_time: DateTime<Utc>,
    /// Reserved end.
    #[serde(default)]
    pub booking_end_time: Option<DateTime<Utc>>,
    /// Expected headcount; missing or non-positive means one person.
    #[serde(default)]
    pub people_count: Option<i64>,
    /// Machines to reserve.
    #[serde(default)]
    pub devices: DeviceSelection,
}

/// A booking as listed on the front-desk board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBooking {
    /// Booking ID.
    pub id: Uuid,
    /// Customer the booking is for.
    pub customer_name: String,
    /// Customer phone number.
    pub contact_number: String,
    /// Reserved start.
    pub booking_time: DateTime<Utc>,
    /// Reserved end.
    pub booking_end_time: Option<DateTime<Utc>>,
    /// Reserved length to one decimal, 0 without a usable end time.
    pub duration_hours: f64,
    /// Expected headcount.
    pub people_count: u32,
    /// Machines reserved.
    pub devices: DeviceSelection,
}

/// One booking turned into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// The consumed booking.
    pub booking_id: Uuid,
    /// The new session.
    pub session_id: Uuid,
    /// Customer name carried over.
    pub customer_name: String,
}

/// Outcome of a booking conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Number of bookings converted.
    pub converted: usize,
    /// Details per conversion.
    pub conversions: Vec<Conversion>,
}

/// Coerces a requested duration: missing, zero, negative or non-finite
/// values become `default_hours`.
pub fn coerce_duration(requested: Option<f64>, default_hours: f64) -> f64 {
    match requested {
        Some(hours) if hours.is_finite() && hours > 0.0 => hours,
        _ => default_hours,
    }
}

/// Coerces a requested headcount: missing or non-positive becomes 1.
pub fn coerce_people(requested: Option<i64>) -> u32 {
    requested
        .filter(|people| *people > 0)
        .and_then(|people| u32::try_from(people).ok())
        .unwrap_or(1)
}

fn round_hours(hours: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (hours * factor).round() / factor
}

fn ledger_overflow(field: &str) -> EngineError {
    EngineError::InvalidRequest {
        field: field.to_string(),
        message: "amount out of range".to_string(),
    }
}

fn ledger_add(total: Decimal, amount: Decimal, field: &str) -> EngineResult<Decimal> {
    total.checked_add(amount).ok_or_else(|| ledger_overflow(field))
}

fn require_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::InvalidRequest {
            field: "customer_name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Front-desk operations over a [`LoungeStore`].
///
/// Every operation takes `now` explicitly so pricing and the booking window
/// can be driven from tests.
pub struct LoungeService {
    config: Arc<ConfigLoader>,
    store: Arc<dyn LoungeStore>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl std::fmt::Debug for LoungeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoungeService")
            .field("lounge", &self.config.lounge().name)
            .finish_non_exhaustive()
    }
}

impl LoungeService {
    /// Creates a service over the given collaborators.
    pub fn new(
        config: Arc<ConfigLoader>,
        store: Arc<dyn LoungeStore>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            config,
            store,
            publisher,
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Machines held by active sessions right now.
    pub fn device_availability(&self) -> EngineResult<DeviceAvailability> {
        let active = self.store.sessions_with_status(SessionStatus::Active)?;
        Ok(DeviceAvailability::from_selections(
            self.config.devices().limits.clone(),
            active.iter().map(|s| &s.devices),
        ))
    }

    /// Machines held during `[start, end)` by active sessions or bookings.
    ///
    /// A booking without an end time is assumed to last the default session
    /// length.
    pub fn device_availability_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<DeviceAvailability> {
        if end <= start {
            return Err(EngineError::InvalidRequest {
                field: "end".to_string(),
                message: "must be after start".to_string(),
            });
        }

        let active = self.store.sessions_with_status(SessionStatus::Active)?;
        let bookings = self.store.bookings()?;
        let default_minutes = (self.config.lounge().default_session_hours * 60.0).round() as i64;

        let sessions = active
            .iter()
            .filter(|s| s.overlaps(start, end))
            .map(|s| &s.devices);
        let reserved = bookings
            .iter()
            .filter(|b| {
                let booking_end = b.booking_end_time.unwrap_or_else(|| {
                    chrono::Duration::try_minutes(default_minutes)
                        .and_then(|length| b.booking_time.checked_add_signed(length))
                        .unwrap_or(DateTime::<Utc>::MAX_UTC)
                });
                b.booking_time < end && booking_end > start
            })
            .map(|b| &b.devices);

        let availability = DeviceAvailability::from_selections(
            self.config.devices().limits.clone(),
            sessions.chain(reserved),
        );
        debug!(%start, %end, occupied = ?availability.occupied, "Window availability");
        Ok(availability)
    }

    /// Checks every requested machine exists, is selected once and is not
    /// held by any active session.
    fn validate_devices(&self, devices: &DeviceSelection) -> EngineResult<()> {
        let active = self.store.sessions_with_status(SessionStatus::Active)?;
        let taken = DeviceAvailability::from_selections(
            self.config.devices().limits.clone(),
            active.iter().map(|s| &s.devices),
        );

        let mut seen = BTreeSet::new();
        for (device, machine_id) in devices.machines() {
            if !seen.insert((device, machine_id)) {
                return Err(EngineError::InvalidRequest {
                    field: "devices".to_string(),
                    message: format!("{} #{} selected more than once", device, machine_id),
                });
            }
            let limit = self.config.device_limit(device);
            if !self.config.devices().contains(device, machine_id) {
                return Err(EngineError::DeviceNotFound {
                    device,
                    machine_id,
                    limit,
                });
            }
            if taken.is_occupied(device, machine_id) {
                return Err(EngineError::DeviceOccupied { device, machine_id });
            }
        }
        Ok(())
    }

    /// Starts a session.
    ///
    /// The price is the request's override when given, otherwise the engine
    /// price at the lounge's local time.
    pub fn create_session(
        &self,
        request: CreateSessionRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<Session> {
        require_name(&request.customer_name)?;

        let duration_hours = coerce_duration(
            request.duration_hours,
            self.config.lounge().default_session_hours,
        );
        let people_count = coerce_people(request.people_count);

        self.validate_devices(&request.devices)?;

        let price = match request.price {
            Some(price) => price,
            None => round_money(
                calculate_session_price(
                    duration_hours,
                    i64::from(people_count),
                    &request.devices,
                    self.config.local_time(now),
                ),
                2,
            ),
        };

        let session = Session {
            id: Uuid::new_v4(),
            customer_name: request.customer_name,
            contact_number: request.contact_number,
            duration_hours,
            people_count,
            snacks: request.snacks,
            devices: request.devices,
            price,
            paid_amount: Decimal::ZERO,
            paid_people: 0,
            remaining_amount: price,
            status: SessionStatus::Active,
            start_time: now,
            created_at: now,
            updated_at: None,
            completed_at: None,
            members: Vec::new(),
            original_booking_id: None,
        };

        self.store.insert_session(session.clone())?;
        info!(
            session_id = %session.id,
            customer = %session.customer_name,
            duration_hours,
            people_count,
            price = %session.price,
            "Session started"
        );
        self.publisher
            .publish(LoungeEvent::SessionStarted(session.clone()));

        Ok(session)
    }

    /// Active sessions, oldest first.
    pub fn active_sessions(&self) -> EngineResult<Vec<Session>> {
        self.store.sessions_with_status(SessionStatus::Active)
    }

    /// Applies a ledger update to a session.
    ///
    /// `price += extra`, `paid_amount += paid_now` and
    /// `remaining_amount = price - paid_amount`. Joining members' machines
    /// are appended to the session's selection and must not be held by any
    /// active session, this one included.
    pub fn update_session(
        &self,
        id: Uuid,
        request: UpdateSessionRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<Session> {
        let mut session = self
            .store
            .get_session(id)?
            .ok_or(EngineError::SessionNotFound { id })?;

        if !request.extra_hours.is_finite() || request.extra_hours < 0.0 {
            return Err(EngineError::InvalidRequest {
                field: "extra_hours".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        let member = request.new_member.unwrap_or_default();
        self.validate_devices(&member.devices)?;

        let extra_price = match request.extra_price {
            Some(extra) => extra,
            None => {
                let change = SessionChange {
                    extra_hours: request.extra_hours,
                    added_people: i64::from(member.people_count),
                    added_devices: member.devices.clone(),
                };
                let extension = quote_extension(
                    session.price.to_f64().unwrap_or_default(),
                    session.duration_hours,
                    i64::from(session.people_count),
                    &session.devices,
                    &change,
                    self.config.local_time(now),
                );
                round_money(extension.charge, 2)
            }
        };

        session.price = ledger_add(session.price, extra_price, "extra_price")?;
        session.paid_amount = ledger_add(session.paid_amount, request.paid_now, "paid_now")?;
        session.remaining_amount = session
            .price
            .checked_sub(session.paid_amount)
            .ok_or_else(|| ledger_overflow("paid_now"))?;
        session.paid_people = session.paid_people.saturating_add(request.paying_people_now);
        session.duration_hours += request.extra_hours;

        let joined = member.people_count > 0 || !member.devices.is_empty();
        if joined {
            session.devices = session.devices.merge(&member.devices);
            session.people_count = session.people_count.saturating_add(member.people_count);
            session.members.push(member);
        }
        session.updated_at = Some(now);

        self.store.update_session(session.clone())?;
        info!(
            session_id = %id,
            extra_price = %extra_price,
            paid_now = %request.paid_now,
            remaining = %session.remaining_amount,
            "Session updated"
        );
        self.publisher
            .publish(LoungeEvent::SessionUpdated(session.clone()));

        Ok(session)
    }

    /// Closes out a session.
    pub fn complete_session(&self, id: Uuid, now: DateTime<Utc>) -> EngineResult<Session> {
        let mut session = self
            .store
            .get_session(id)?
            .ok_or(EngineError::SessionNotFound { id })?;

        session.status = SessionStatus::Completed;
        session.completed_at = Some(now);

        self.store.update_session(session.clone())?;
        info!(session_id = %id, "Session completed");
        self.publisher
            .publish(LoungeEvent::SessionCompleted(session.clone()));

        Ok(session)
    }

    /// Removes a session.
    pub fn delete_session(&self, id: Uuid) -> EngineResult<()> {
        if !self.store.delete_session(id)? {
            return Err(EngineError::SessionNotFound { id });
        }
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Records a booking.
    pub fn create_booking(
        &self,
        request: CreateBookingRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<Booking> {
        require_name(&request.customer_name)?;
        if let Some(end) = request.booking_end_time {
            if end <= request.booking_time {
                return Err(EngineError::InvalidRequest {
                    field: "booking_end_time".to_string(),
                    message: "must be after booking_time".to_string(),
                });
            }
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            customer_name: request.customer_name,
            contact_number: request.contact_number,
            booking_time: request.booking_time,
            booking_end_time: request.booking_end_time,
            people_count: coerce_people(request.people_count),
            devices: request.devices,
            created_at: now,
        };

        self.store.insert_booking(booking.clone())?;
        info!(
            booking_id = %booking.id,
            customer = %booking.customer_name,
            booking_time = %booking.booking_time,
            "Booking created"
        );
        Ok(booking)
    }

    /// Bookings not yet converted, earliest first.
    pub fn upcoming_bookings(&self) -> EngineResult<Vec<UpcomingBooking>> {
        let bookings = self.store.bookings()?;
        Ok(bookings
            .into_iter()
            .map(|b| UpcomingBooking {
                duration_hours: b.duration_hours().map_or(0.0, |h| round_hours(h, 1)),
                id: b.id,
                customer_name: b.customer_name,
                contact_number: b.contact_number,
                booking_time: b.booking_time,
                booking_end_time: b.booking_end_time,
                people_count: b.people_count,
                devices: b.devices,
            })
            .collect())
    }

    /// Removes a booking.
    pub fn delete_booking(&self, id: Uuid) -> EngineResult<()> {
        if !self.store.delete_booking(id)? {
            return Err(EngineError::BookingNotFound { id });
        }
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }

    /// Converts every booking whose start lies within the conversion window
    /// before `now` into an active session priced at `now`.
    pub fn convert_due_bookings(&self, now: DateTime<Utc>) -> EngineResult<ConversionReport> {
        let window_ms = self.config.lounge().booking_conversion_window_seconds * 1000;
        let default_hours = self.config.lounge().default_session_hours;
        let local_now = self.config.local_time(now);

        let mut report = ConversionReport::default();
        for booking in self.store.bookings()? {
            let elapsed_ms = (now - booking.booking_time).num_milliseconds();
            if !(0..=window_ms).contains(&elapsed_ms) {
                continue;
            }

            let duration_hours = booking
                .duration_hours()
                .map_or(default_hours, |h| round_hours(h, 2));
            let people_count = booking.people_count.max(1);
            let price = round_money(
                calculate_session_price(
                    duration_hours,
                    i64::from(people_count),
                    &booking.devices,
                    local_now,
                ),
                2,
            );

            let session = Session {
                id: Uuid::new_v4(),
                customer_name: booking.customer_name.clone(),
                contact_number: booking.contact_number.clone(),
                duration_hours,
                people_count,
                snacks: String::new(),
                devices: booking.devices.clone(),
                price,
                paid_amount: Decimal::ZERO,
                paid_people: 0,
                remaining_amount: price,
                status: SessionStatus::Active,
                start_time: now,
                created_at: now,
                updated_at: None,
                completed_at: None,
                members: Vec::new(),
                original_booking_id: Some(booking.id),
            };

            self.store.insert_session(session.clone())?;
            self.store.delete_booking(booking.id)?;
            info!(
                booking_id = %booking.id,
                session_id = %session.id,
                customer = %booking.customer_name,
                price = %price,
                "Booking converted to session"
            );

            report.conversions.push(Conversion {
                booking_id: booking.id,
                session_id: session.id,
                customer_name: booking.customer_name,
            });
            self.publisher.publish(LoungeEvent::BookingConverted {
                booking_id: booking.id,
                session,
            });
        }

        report.converted = report.conversions.len();
        Ok(report)
    }
}
