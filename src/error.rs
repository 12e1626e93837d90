//! Error types for the lounge engine.
//!
//! The pricing core itself never fails; these errors come from the
//! configuration loader and the session/booking services around it.

use thiserror::Error;
use uuid::Uuid;

use crate::models::DeviceType;

/// The main error type for the lounge engine.
///
/// # Example
///
/// ```
/// use lounge_engine::error::EngineError;
/// use lounge_engine::models::DeviceType;
///
/// let error = EngineError::DeviceOccupied {
///     device: DeviceType::Ps,
///     machine_id: 2,
/// };
/// assert_eq!(error.to_string(), "PS #2 is currently occupied");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A requested machine ID is outside the lounge's inventory.
    #[error("{device} #{machine_id} does not exist (Max {limit})")]
    DeviceNotFound {
        /// The device type requested.
        device: DeviceType,
        /// The machine ID requested.
        machine_id: u32,
        /// The number of machines of this type the lounge has.
        limit: u32,
    },

    /// A requested machine is held by an active session.
    #[error("{device} #{machine_id} is currently occupied")]
    DeviceOccupied {
        /// The device type requested.
        device: DeviceType,
        /// The machine ID requested.
        machine_id: u32,
    },

    /// No session exists with the given ID.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The session ID.
        id: Uuid,
    },

    /// No booking exists with the given ID.
    #[error("Booking not found: {id}")]
    BookingNotFound {
        /// The booking ID.
        id: Uuid,
    },

    /// A request field was missing or out of range.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The document store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/lounge.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/lounge.yaml"
        );
    }

    #[test]
    fn test_device_not_found_displays_limit() {
        let error = EngineError::DeviceNotFound {
            device: DeviceType::Pc,
            machine_id: 11,
            limit: 10,
        };
        assert_eq!(error.to_string(), "PC #11 does not exist (Max 10)");
    }

    #[test]
    fn test_device_occupied_uses_uppercase_label() {
        let error = EngineError::DeviceOccupied {
            device: DeviceType::Metabat,
            machine_id: 3,
        };
        assert_eq!(error.to_string(), "METABAT #3 is currently occupied");
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "end".to_string(),
            message: "must be after start".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'end': must be after start"
        );
    }

    #[test]
    fn test_session_not_found_displays_id() {
        let id = Uuid::nil();
        let error = EngineError::SessionNotFound { id };
        assert_eq!(
            error.to_string(),
            "Session not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> EngineResult<()> {
            Err(EngineError::StoreError {
                message: "lock poisoned".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
