//! Vendor session cache and PTZ command relay
//!
//! [`CloudSession`] holds the single cached vendor token and wraps every
//! authenticated call with the re-authentication policy: when a call fails
//! with [`ReolinkError::TokenExpired`], the token is dropped, re-acquired,
//! and the call retried exactly once. Network failures are surfaced
//! immediately with no retry.
//!
//! Concurrent acquires after an invalidation may both log in; the last
//! successful login overwrites the cache. No cross-request lock is held.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::PtzCloudClient;
use crate::error::ReolinkError;
use crate::models::{CameraStatus, Preset, PtzCommand, SessionToken};

/// Owns the cached vendor session token and relays authenticated calls
pub struct CloudSession {
    client: Arc<dyn PtzCloudClient>,
    token: RwLock<Option<SessionToken>>,
}

impl fmt::Debug for CloudSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudSession")
            .field("has_session", &self.has_session())
            .finish_non_exhaustive()
    }
}

impl CloudSession {
    /// Create a session cache around a cloud client
    #[must_use]
    pub fn new(client: Arc<dyn PtzCloudClient>) -> Self {
        Self {
            client,
            token: RwLock::new(None),
        }
    }

    /// Return the cached token, logging in first when none is valid
    ///
    /// # Errors
    ///
    /// Returns the login failure when the vendor rejects the device
    /// credentials or is unreachable.
    pub async fn acquire(&self) -> Result<SessionToken, ReolinkError> {
        // Guard must not be held across the login await
        let cached = self.token.read().clone();
        if let Some(token) = cached {
            if token.is_valid() {
                return Ok(token);
            }
            debug!("Cached vendor token expired, re-authenticating");
        }

        let fresh = self.client.login().await?;
        *self.token.write() = Some(fresh.clone());
        debug!("Vendor session acquired");
        Ok(fresh)
    }

    /// Drop the cached token
    pub fn invalidate(&self) {
        *self.token.write() = None;
    }

    /// Whether a valid vendor session is currently cached
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.token.read().as_ref().is_some_and(SessionToken::is_valid)
    }

    /// Run an authenticated call, retrying once after a token expiry
    async fn with_token<T, F, Fut>(&self, op: F) -> Result<T, ReolinkError>
    where
        F: Fn(SessionToken) -> Fut,
        Fut: Future<Output = Result<T, ReolinkError>>,
    {
        let token = self.acquire().await?;
        match op(token).await {
            Err(ReolinkError::TokenExpired) => {
                warn!("Vendor rejected session token, re-authenticating once");
                self.invalidate();
                let token = self.acquire().await?;
                op(token).await
            }
            other => other,
        }
    }

    /// Relay a PTZ command, validating it locally first
    ///
    /// # Errors
    ///
    /// Returns [`ReolinkError::InvalidCommand`] without any vendor call for
    /// invalid input; otherwise the vendor outcome, after at most one
    /// re-authentication retry.
    pub async fn ptz(&self, command: &PtzCommand) -> Result<Value, ReolinkError> {
        command.validate()?;

        let client = Arc::clone(&self.client);
        self.with_token(move |token| {
            let client = Arc::clone(&client);
            let command = command.clone();
            async move { client.ptz_control(&token, &command).await }
        })
        .await
    }

    /// Fetch camera status through the cached session
    pub async fn camera_status(&self, camera_uid: &str) -> Result<CameraStatus, ReolinkError> {
        let client = Arc::clone(&self.client);
        self.with_token(move |token| {
            let client = Arc::clone(&client);
            let camera_uid = camera_uid.to_string();
            async move { client.camera_status(&token, &camera_uid).await }
        })
        .await
    }

    /// List camera presets through the cached session
    pub async fn list_presets(&self, camera_uid: &str) -> Result<Vec<Preset>, ReolinkError> {
        let client = Arc::clone(&self.client);
        self.with_token(move |token| {
            let client = Arc::clone(&client);
            let camera_uid = camera_uid.to_string();
            async move { client.list_presets(&token, &camera_uid).await }
        })
        .await
    }

    /// Recall a camera preset through the cached session
    pub async fn recall_preset(
        &self,
        camera_uid: &str,
        preset_id: u32,
    ) -> Result<(), ReolinkError> {
        let client = Arc::clone(&self.client);
        self.with_token(move |token| {
            let client = Arc::clone(&client);
            let camera_uid = camera_uid.to_string();
            async move { client.recall_preset(&token, &camera_uid, preset_id).await }
        })
        .await
    }
}
