//! PTZ gateway HTTP layer
//!
//! Exposes the frontend-facing REST API: fixed-credential login, bearer
//! session handling, and the PTZ/camera endpoints relayed to the Reolink
//! Cloud through [`reolink_cloud`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod state;

pub use config::{AppConfig, AuthConfig, ServerConfig};
pub use error::ApiError;
pub use middleware::{SessionAuthLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use sessions::SessionStore;
pub use state::AppState;
