//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Frontend login
        .route("/login", post(handlers::auth::login))
        // PTZ relay
        .route("/ptz", post(handlers::ptz::ptz))
        // Camera status and presets
        .route("/camera/{uid}/status", get(handlers::camera::status))
        .route("/camera/{uid}/presets", get(handlers::camera::presets))
        .route(
            "/camera/{uid}/presets/{id}/recall",
            post(handlers::camera::recall_preset),
        )
        // Attach state
        .with_state(state)
}
