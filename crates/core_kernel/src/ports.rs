//! Ports and Adapters Infrastructure
//!
//! Domain crates declare port traits (the NAV store, the remote NAV source)
//! that adapters implement. Every adapter reports failures through
//! [`PortError`] so the domain never sees SQL or HTTP error types.
//!
//! ```text
//!            ┌───────────────────────────┐
//!            │   domain_fund services    │
//!            └─────────────┬─────────────┘
//!                          ▼
//!            ┌───────────────────────────┐
//!            │  NavStore / NavSource     │
//!            └──────┬─────────────┬──────┘
//!                   ▲             ▲
//!         ┌─────────┴───┐   ┌─────┴──────────┐
//!         │  infra_db   │   │  infra_source  │
//!         │ (Postgres)  │   │  (HTTP/JSON)   │
//!         └─────────────┘   └────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external system answered with a non-success status
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A payload could not be decoded
    #[error("Malformed response: {message}")]
    Malformed {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Connection error that keeps its cause
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Creates a Malformed error
    pub fn malformed(message: impl Into<String>) -> Self {
        PortError::Malformed {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if the underlying system could not be reached
    pub fn is_connection(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Returns true if this error indicates a duplicate record
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_connection_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = PortError::connection_with_source("database unreachable", io);

        assert!(err.is_connection());
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Connection error: database unreachable");
    }

    #[test]
    fn test_classification() {
        assert!(PortError::conflict("dup").is_conflict());
        assert!(!PortError::malformed("bad json").is_connection());
        assert_eq!(
            PortError::not_found("NAV", "000962").to_string(),
            "Not found: NAV with id 000962"
        );
    }
}
