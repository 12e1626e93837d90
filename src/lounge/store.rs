//! Session and booking persistence.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, Session, SessionStatus};

/// Document store holding sessions and bookings.
///
/// Implementations must be shareable across request handlers and the
/// booking scheduler.
pub trait LoungeStore: Send + Sync {
    /// Stores a new session.
    fn insert_session(&self, session: Session) -> EngineResult<()>;

    /// Fetches a session by ID.
    fn get_session(&self, id: Uuid) -> EngineResult<Option<Session>>;

    /// Replaces a stored session. Fails with `SessionNotFound` if absent.
    fn update_session(&self, session: Session) -> EngineResult<()>;

    /// Removes a session, returning whether it existed.
    fn delete_session(&self, id: Uuid) -> EngineResult<bool>;

    /// Lists sessions in `status`, oldest start first.
    fn sessions_with_status(&self, status: SessionStatus) -> EngineResult<Vec<Session>>;

    /// Stores a new booking.
    fn insert_booking(&self, booking: Booking) -> EngineResult<()>;

    /// Removes a booking, returning whether it existed.
    fn delete_booking(&self, id: Uuid) -> EngineResult<bool>;

    /// Lists all stored bookings, earliest start first.
    fn bookings(&self) -> EngineResult<Vec<Booking>>;
}

/// In-process store backed by hash maps.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StoreError {
        message: "store lock poisoned".to_string(),
    }
}

impl LoungeStore for InMemoryStore {
    fn insert_session(&self, session: Session) -> EngineResult<()> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.insert(session.id, session);
        Ok(())
    }

    fn get_session(&self, id: Uuid) -> EngineResult<Option<Session>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(&id).cloned())
    }

    fn update_session(&self, session: Session) -> EngineResult<()> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        match sessions.get_mut(&session.id) {
            Some(stored) => {
                *stored = session;
                Ok(())
            }
            None => Err(EngineError::SessionNotFound { id: session.id }),
        }
    }

    fn delete_session(&self, id: Uuid) -> EngineResult<bool> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        Ok(sessions.remove(&id).is_some())
    }

    fn sessions_with_status(&self, status: SessionStatus) -> EngineResult<Vec<Session>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        let mut matching: Vec<Session> = sessions
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.start_time);
        Ok(matching)
    }

    fn insert_booking(&self, booking: Booking) -> EngineResult<()> {
        let mut bookings = self.bookings.write().map_err(poisoned)?;
        bookings.insert(booking.id, booking);
        Ok(())
    }

    fn delete_booking(&self, id: Uuid) -> EngineResult<bool> {
        let mut bookings = self.bookings.write().map_err(poisoned)?;
        Ok(bookings.remove(&id).is_some())
    }

    fn bookings(&self) -> EngineResult<Vec<Booking>> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        let mut all: Vec<Booking> = bookings.values().cloned().collect();
        all.sort_by_key(|b| b.booking_time);
        Ok(all)
    }
}
