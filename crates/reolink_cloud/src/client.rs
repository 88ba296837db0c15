//! Reolink Cloud HTTP client
//!
//! Thin reqwest-based client for the vendor endpoints. Session caching and
//! the re-authentication retry live in [`crate::session::CloudSession`];
//! this layer maps one HTTP call to one vendor operation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ReolinkConfig;
use crate::error::ReolinkError;
use crate::models::{CameraStatus, Preset, PtzCommand, SessionToken, VendorEnvelope};

/// Trait for Reolink Cloud clients, the seam for test doubles
#[async_trait]
pub trait PtzCloudClient: Send + Sync {
    /// Authenticate the device account and obtain a fresh session token
    async fn login(&self) -> Result<SessionToken, ReolinkError>;

    /// Issue a PTZ command against a camera
    async fn ptz_control(
        &self,
        token: &SessionToken,
        command: &PtzCommand,
    ) -> Result<Value, ReolinkError>;

    /// Fetch the current status of a camera
    async fn camera_status(
        &self,
        token: &SessionToken,
        camera_uid: &str,
    ) -> Result<CameraStatus, ReolinkError>;

    /// List saved presets for a camera
    async fn list_presets(
        &self,
        token: &SessionToken,
        camera_uid: &str,
    ) -> Result<Vec<Preset>, ReolinkError>;

    /// Move a camera to a saved preset
    async fn recall_preset(
        &self,
        token: &SessionToken,
        camera_uid: &str,
        preset_id: u32,
    ) -> Result<(), ReolinkError>;
}

/// Reqwest-based implementation of [`PtzCloudClient`]
#[derive(Debug)]
pub struct ReolinkCloudClient {
    client: Client,
    config: ReolinkConfig,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CameraData {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PresetData {
    #[serde(default)]
    presets: Vec<Preset>,
}

impl ReolinkCloudClient {
    /// Create a new cloud client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ReolinkConfig) -> Result<Self, ReolinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReolinkError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn map_send_error(&self, e: reqwest::Error) -> ReolinkError {
        if e.is_timeout() {
            ReolinkError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_connect() {
            ReolinkError::ConnectionFailed(e.to_string())
        } else {
            ReolinkError::RequestFailed(e.to_string())
        }
    }

    /// Map the HTTP status of an authenticated vendor call
    ///
    /// A 401 means the session token was rejected and the caller should
    /// re-authenticate; 5xx means the vendor is down.
    fn check_status(status: StatusCode) -> Result<(), ReolinkError> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(ReolinkError::TokenExpired);
        }
        if status.is_server_error() {
            return Err(ReolinkError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ReolinkError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }

    async fn parse_envelope(response: reqwest::Response) -> Result<VendorEnvelope, ReolinkError> {
        response
            .json::<VendorEnvelope>()
            .await
            .map_err(|e| ReolinkError::ParseError(e.to_string()))
    }

    fn envelope_data(envelope: VendorEnvelope) -> Result<Value, ReolinkError> {
        if envelope.code == 0 {
            Ok(envelope.data.unwrap_or(Value::Null))
        } else {
            Err(ReolinkError::RequestFailed(envelope.message()))
        }
    }

    fn parse_data<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, ReolinkError> {
        serde_json::from_value(data).map_err(|e| ReolinkError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl PtzCloudClient for ReolinkCloudClient {
    #[instrument(skip(self))]
    async fn login(&self) -> Result<SessionToken, ReolinkError> {
        let url = format!("{}/login", self.config.base_url);
        debug!(url = %url, "Authenticating device account with Reolink Cloud");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "email": self.config.email,
                "password": self.config.password.expose_secret(),
            }))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ReolinkError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ReolinkError::AuthFailed(format!("HTTP {status}")));
        }

        let envelope = Self::parse_envelope(response).await?;
        if envelope.code != 0 {
            return Err(ReolinkError::AuthFailed(envelope.message()));
        }

        let data: LoginData = Self::parse_data(envelope.data.unwrap_or(Value::Null))?;

        Ok(SessionToken {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            expires_at: Utc::now() + chrono::Duration::hours(self.config.token_ttl_hours),
        })
    }

    #[instrument(skip(self, token), fields(camera = %command.camera_uid, direction = %command.direction))]
    async fn ptz_control(
        &self,
        token: &SessionToken,
        command: &PtzCommand,
    ) -> Result<Value, ReolinkError> {
        let url = format!(
            "{}/camera/{}/ptz",
            self.config.base_url, command.camera_uid
        );

        // Vendor payload shape: {"<direction>": <speed>}
        let mut payload = serde_json::Map::new();
        payload.insert(
            command.direction.as_str().to_string(),
            Value::from(command.speed),
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response.status())?;
        Self::envelope_data(Self::parse_envelope(response).await?)
    }

    #[instrument(skip(self, token), fields(camera = %camera_uid))]
    async fn camera_status(
        &self,
        token: &SessionToken,
        camera_uid: &str,
    ) -> Result<CameraStatus, ReolinkError> {
        let url = format!("{}/camera/{camera_uid}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response.status())?;
        let data = Self::envelope_data(Self::parse_envelope(response).await?)?;
        let camera: CameraData = Self::parse_data(data)?;

        Ok(CameraStatus {
            uid: camera.uid.unwrap_or_else(|| camera_uid.to_string()),
            name: camera.name.unwrap_or_default(),
            online: camera.status == Some(1),
        })
    }

    #[instrument(skip(self, token), fields(camera = %camera_uid))]
    async fn list_presets(
        &self,
        token: &SessionToken,
        camera_uid: &str,
    ) -> Result<Vec<Preset>, ReolinkError> {
        let url = format!("{}/camera/{camera_uid}/presets", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response.status())?;
        let data = Self::envelope_data(Self::parse_envelope(response).await?)?;
        let presets: PresetData = Self::parse_data(data)?;

        Ok(presets.presets)
    }

    #[instrument(skip(self, token), fields(camera = %camera_uid, preset = preset_id))]
    async fn recall_preset(
        &self,
        token: &SessionToken,
        camera_uid: &str,
        preset_id: u32,
    ) -> Result<(), ReolinkError> {
        let url = format!(
            "{}/camera/{camera_uid}/preset/{preset_id}",
            self.config.base_url
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response.status())?;
        Self::envelope_data(Self::parse_envelope(response).await?).map(|_| ())
    }
}
