//! Error types for the broker and backend layers.

use crate::model::{ObjectClass, ObjectKey};
use std::io;
use thiserror::Error;

/// Opaque failure from the hardware-abstraction backend.
///
/// The broker wraps these into [`BrokerError::Backend`]; only an `init`
/// failure at startup is treated as fatal by the lifecycle controller.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Operation attempted before `init` completed.
    #[error("backend not initialized")]
    NotInitialized,

    /// Lower-level hardware access failure.
    #[error("hardware access failed: {0}")]
    Hardware(String),

    /// I/O error from the plugin layer (sysfs, EEPROM reads, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors surfaced to broker callers.
///
/// Every operation replies with `Result<Out, BrokerError>`; the worker
/// never panics on a bad request or a backend failure.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker is not serving: it has not finished initializing, its
    /// startup failed, or it is shutting down.
    #[error("broker is not ready to serve requests")]
    NotReady,

    /// The requested object is unknown to the backend.
    #[error("{class} {key} not found")]
    NotFound {
        /// Class of the missing object.
        class: ObjectClass,
        /// Key that was looked up.
        key: ObjectKey,
    },

    /// Malformed request input (bad pagination cursor, etc.).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Update referenced an unknown or immutable attribute.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Optimistic-concurrency check failed on an update.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend call exceeded the broker's time budget.
    #[error("{class} {op} timed out")]
    Timeout {
        /// Class the operation targeted.
        class: ObjectClass,
        /// Operation name, for logs.
        op: &'static str,
    },

    /// Opaque lower-layer failure, wrapped with context.
    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = BrokerError::NotFound {
            class: ObjectClass::Fan,
            key: ObjectKey::Id(7),
        };
        assert_eq!(err.to_string(), "fan 7 not found");
    }

    #[test]
    fn test_timeout_display_names_operation() {
        let err = BrokerError::Timeout {
            class: ObjectClass::Sfp,
            op: "get_bulk_sfp_state",
        };
        assert!(err.to_string().contains("sfp"));
        assert!(err.to_string().contains("get_bulk_sfp_state"));
    }

    #[test]
    fn test_backend_error_wraps_into_broker_error() {
        let backend = BackendError::Hardware("i2c read failed".to_string());
        let err: BrokerError = backend.into();
        assert!(matches!(err, BrokerError::Backend(_)));
        assert!(err.to_string().contains("i2c read failed"));
    }

    #[test]
    fn test_io_error_wraps_into_backend_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "eeprom missing");
        let err: BackendError = io_err.into();
        assert!(matches!(err, BackendError::Io(_)));
    }
}
