//! Reolink Cloud error types

use thiserror::Error;

/// Errors that can occur when talking to the Reolink Cloud API
#[derive(Debug, Error)]
pub enum ReolinkError {
    /// Connection to the cloud service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The cloud rejected the request (non-auth failure)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The cloud rejected the device account credentials
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The session token has expired or was invalidated by the vendor
    #[error("Session token expired")]
    TokenExpired,

    /// Failed to parse a response from the cloud service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The cloud service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// A PTZ command failed local validation; no cloud call was made
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl ReolinkError {
    /// Returns true if this error indicates the cached token must be dropped
    /// and the call retried with a fresh one.
    #[must_use]
    pub const fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }

    /// Returns true if this error means the vendor could not be reached at all.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::ServiceUnavailable(_) | Self::Timeout { .. }
        )
    }
}
