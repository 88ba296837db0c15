//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    /// Whether a vendor session is currently cached
    pub vendor_session: bool,
    /// Number of live frontend sessions
    pub frontend_sessions: usize,
}

/// Readiness check
///
/// The gateway acquires vendor sessions lazily, so it is ready even before
/// the first login; `vendor_session` reports whether one is already held.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    state.sessions.purge_expired();

    Json(ReadinessResponse {
        ready: true,
        vendor_session: state.cloud.has_session(),
        frontend_sessions: state.sessions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let response = health_check().await;
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }

    #[test]
    fn health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains("ok"));
    }

    #[test]
    fn readiness_response_serialization() {
        let response = ReadinessResponse {
            ready: true,
            vendor_session: false,
            frontend_sessions: 0,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ready"));
        assert!(json.contains("vendor_session"));
        assert!(json.contains("frontend_sessions"));
    }

    #[test]
    fn readiness_response_deserialization() {
        let json = r#"{"ready":true,"vendor_session":true,"frontend_sessions":2}"#;
        let response: ReadinessResponse = serde_json::from_str(json).unwrap();
        assert!(response.ready);
        assert!(response.vendor_session);
        assert_eq!(response.frontend_sessions, 2);
    }
}
