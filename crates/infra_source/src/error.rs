//! Error types for the NAV source client.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur when calling the NAV source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The source answered with a non-success HTTP status.
    #[error("NAV source returned HTTP {status}")]
    Status { status: u16 },

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL is not usable.
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

impl From<SourceError> for PortError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Request(e) => PortError::connection_with_source("NAV source unreachable", e),
            SourceError::Status { status } => PortError::unavailable(format!("NAV source (HTTP {})", status)),
            e @ SourceError::Json(_) => PortError::malformed(e.to_string()),
            e => PortError::internal(e.to_string()),
        }
    }
}
