//! Reolink Cloud integration
//!
//! Client for the Reolink Cloud API: device-account login, PTZ control,
//! camera status, and preset recall. The [`CloudSession`] wrapper caches
//! the vendor session token and transparently re-authenticates once when
//! the vendor reports an expired token.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use client::{PtzCloudClient, ReolinkCloudClient};
pub use config::ReolinkConfig;
pub use error::ReolinkError;
pub use models::{
    CameraStatus, Preset, PtzCommand, PtzDirection, SessionToken, PTZ_SPEED_MAX, PTZ_SPEED_MIN,
};
pub use session::CloudSession;
