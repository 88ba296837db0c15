//! API error handling
//!
//! Every failure path resolves to the same JSON envelope the success paths
//! use: `{"success": false, "error": ..., "code": ...}`. Vendor errors map
//! onto the gateway taxonomy: validation and credential failures are 4xx,
//! a vendor rejection (after the single re-auth retry) is 502, and an
//! unreachable vendor is 503.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reolink_cloud::ReolinkError;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input shape or range; no vendor call was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid frontend credentials/session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The vendor rejected the request or its credentials
    #[error("Vendor rejected request: {0}")]
    VendorRejected(String),

    /// The vendor could not be reached
    #[error("Vendor unavailable: {0}")]
    VendorUnavailable(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response envelope
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always false for errors
    pub success: bool,
    /// Error message
    pub error: String,
    /// Stable machine-readable error code
    pub code: String,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::VendorRejected(_) => StatusCode::BAD_GATEWAY,
            Self::VendorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Unauthorized(_) => "unauthorized",
            Self::VendorRejected(_) => "vendor_rejected",
            Self::VendorUnavailable(_) => "vendor_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::VendorRejected(msg)
            | Self::VendorUnavailable(msg) => msg.clone(),
            // Internal details stay out of responses
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            success: false,
            error: self.message(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ReolinkError> for ApiError {
    fn from(err: ReolinkError) -> Self {
        match err {
            ReolinkError::InvalidCommand(msg) => Self::Validation(msg),
            ReolinkError::AuthFailed(msg) => Self::VendorRejected(msg),
            // Expiry surviving the single re-auth retry is a vendor rejection
            ReolinkError::TokenExpired => {
                Self::VendorRejected("vendor session expired".to_string())
            }
            ReolinkError::RequestFailed(msg) | ReolinkError::ParseError(msg) => {
                Self::VendorRejected(msg)
            }
            ReolinkError::ConnectionFailed(msg) | ReolinkError::ServiceUnavailable(msg) => {
                Self::VendorUnavailable(msg)
            }
            ReolinkError::Timeout { timeout_secs } => {
                Self::VendorUnavailable(format!("request timed out after {timeout_secs}s"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let response = ApiError::Validation("speed out of range".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = ApiError::Unauthorized("missing token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn vendor_rejected_maps_to_502() {
        let response = ApiError::VendorRejected("camera offline".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn vendor_unavailable_maps_to_503() {
        let response = ApiError::VendorUnavailable("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_hides_details() {
        let err = ApiError::Internal("lock poisoned at src/state.rs".to_string());
        assert_eq!(err.message(), "An internal error occurred");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn envelope_serializes_with_success_false() {
        let body = ErrorEnvelope {
            success: false,
            error: "nope".to_string(),
            code: "validation_error".to_string(),
        };
        let json = serde_json::to_string(&body).expect("should serialize");
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("validation_error"));
    }

    #[test]
    fn invalid_command_converts_to_validation() {
        let err: ApiError = ReolinkError::InvalidCommand("speed".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn auth_failed_converts_to_vendor_rejected() {
        let err: ApiError = ReolinkError::AuthFailed("bad creds".to_string()).into();
        assert!(matches!(err, ApiError::VendorRejected(_)));
    }

    #[test]
    fn token_expired_converts_to_vendor_rejected() {
        let err: ApiError = ReolinkError::TokenExpired.into();
        assert!(matches!(err, ApiError::VendorRejected(_)));
    }

    #[test]
    fn connection_failures_convert_to_unavailable() {
        let err: ApiError = ReolinkError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, ApiError::VendorUnavailable(_)));

        let err: ApiError = ReolinkError::Timeout { timeout_secs: 10 }.into();
        assert!(matches!(err, ApiError::VendorUnavailable(_)));
    }
}
