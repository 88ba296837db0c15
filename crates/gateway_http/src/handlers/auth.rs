//! Login handler
//!
//! Validates the fixed frontend credential pair and, on success, issues a
//! bearer session token and eagerly warms the vendor session. A warm-up
//! failure is logged but does not fail the login; the first PTZ call will
//! re-attempt lazily.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::middleware::ValidatedJson;
use crate::state::AppState;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Submitted username
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    /// Submitted password
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Login response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the credentials matched
    pub success: bool,
    /// Bearer session token on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Failure reason, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Handle a login request
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    if !state.config.auth.verify(&request.username, &request.password) {
        info!("Login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                token: None,
                message: Some("Invalid credentials".to_string()),
            }),
        );
    }

    let token = state.sessions.issue();

    // Warm the vendor session so the first PTZ call doesn't pay for login
    if let Err(e) = state.cloud.acquire().await {
        warn!(error = %e, "Vendor session warm-up failed, will retry lazily");
    }

    info!("Login accepted");
    (
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            token: Some(token),
            message: None,
        }),
    )
}
