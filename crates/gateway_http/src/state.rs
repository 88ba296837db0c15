//! Application state shared across handlers

use std::sync::Arc;

use reolink_cloud::CloudSession;

use crate::config::AppConfig;
use crate::sessions::SessionStore;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Vendor session cache and command relay
    pub cloud: Arc<CloudSession>,
    /// Frontend bearer session store
    pub sessions: Arc<SessionStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
