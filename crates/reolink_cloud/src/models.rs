//! Data models for the Reolink Cloud API

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReolinkError;

/// Minimum accepted PTZ speed
pub const PTZ_SPEED_MIN: u8 = 1;

/// Maximum accepted PTZ speed
pub const PTZ_SPEED_MAX: u8 = 64;

/// A PTZ movement axis/action understood by the vendor API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PtzDirection {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    Stop,
}

impl PtzDirection {
    /// The wire name the vendor API expects as the payload key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for PtzDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PtzDirection {
    type Err = ReolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            "stop" => Ok(Self::Stop),
            other => Err(ReolinkError::InvalidCommand(format!(
                "unknown direction: {other}"
            ))),
        }
    }
}

/// A single PTZ command, built per request and discarded after relaying
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtzCommand {
    /// Vendor UID of the target camera
    pub camera_uid: String,
    /// Movement direction or stop
    pub direction: PtzDirection,
    /// Movement speed, [`PTZ_SPEED_MIN`]..=[`PTZ_SPEED_MAX`]
    pub speed: u8,
}

impl PtzCommand {
    /// Validate the command before any vendor call is made
    ///
    /// # Errors
    ///
    /// Returns [`ReolinkError::InvalidCommand`] when the camera UID is empty
    /// or the speed is outside the accepted range.
    pub fn validate(&self) -> Result<(), ReolinkError> {
        if self.camera_uid.trim().is_empty() {
            return Err(ReolinkError::InvalidCommand(
                "camera_uid must not be empty".to_string(),
            ));
        }

        if !(PTZ_SPEED_MIN..=PTZ_SPEED_MAX).contains(&self.speed) {
            return Err(ReolinkError::InvalidCommand(format!(
                "speed must be between {PTZ_SPEED_MIN} and {PTZ_SPEED_MAX}, got {}",
                self.speed
            )));
        }

        Ok(())
    }
}

/// An opaque vendor session token with its local validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Bearer token for subsequent vendor calls
    pub access_token: String,
    /// Refresh token, if the vendor issued one
    pub refresh_token: Option<String>,
    /// Point in time after which the token is treated as expired
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Whether the token is still inside its validity window
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// The uniform `{code, msg, data}` envelope every vendor response uses
#[derive(Debug, Deserialize)]
pub struct VendorEnvelope {
    /// Zero on success, vendor-defined error code otherwise
    pub code: i64,
    /// Human-readable error message on failure
    #[serde(default)]
    pub msg: Option<String>,
    /// Response payload on success
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl VendorEnvelope {
    /// Vendor error message, or a placeholder when none was supplied
    #[must_use]
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .unwrap_or_else(|| format!("vendor error code {}", self.code))
    }
}

/// Camera status as reported by the cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraStatus {
    /// Vendor UID of the camera
    pub uid: String,
    /// Camera display name
    pub name: String,
    /// Whether the camera is currently online
    pub online: bool,
}

/// A saved camera position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Vendor preset identifier
    pub id: u32,
    /// Preset display name
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn command(direction: PtzDirection, speed: u8) -> PtzCommand {
        PtzCommand {
            camera_uid: "cam1".to_string(),
            direction,
            speed,
        }
    }

    #[test]
    fn test_direction_wire_names() {
        assert_eq!(PtzDirection::Up.as_str(), "up");
        assert_eq!(PtzDirection::ZoomIn.as_str(), "zoom-in");
        assert_eq!(PtzDirection::ZoomOut.as_str(), "zoom-out");
        assert_eq!(PtzDirection::Stop.as_str(), "stop");
    }

    #[test]
    fn test_direction_serde_kebab_case() {
        let json = serde_json::to_string(&PtzDirection::ZoomIn).expect("should serialize");
        assert_eq!(json, r#""zoom-in""#);

        let direction: PtzDirection =
            serde_json::from_str(r#""left""#).expect("should deserialize");
        assert_eq!(direction, PtzDirection::Left);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(
            "zoom-out".parse::<PtzDirection>().expect("should parse"),
            PtzDirection::ZoomOut
        );
        assert!("sideways".parse::<PtzDirection>().is_err());
        assert!("UP".parse::<PtzDirection>().is_err());
    }

    #[test]
    fn test_command_validate_accepts_speed_bounds() {
        assert!(command(PtzDirection::Left, PTZ_SPEED_MIN).validate().is_ok());
        assert!(command(PtzDirection::Left, PTZ_SPEED_MAX).validate().is_ok());
        assert!(command(PtzDirection::Left, 5).validate().is_ok());
    }

    #[test]
    fn test_command_validate_rejects_out_of_range_speed() {
        assert!(command(PtzDirection::Left, 0).validate().is_err());
        assert!(command(PtzDirection::Left, PTZ_SPEED_MAX + 1).validate().is_err());
    }

    #[test]
    fn test_command_validate_rejects_empty_uid() {
        let cmd = PtzCommand {
            camera_uid: "  ".to_string(),
            direction: PtzDirection::Up,
            speed: 5,
        };
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_session_token_validity() {
        let valid = SessionToken {
            access_token: "tok".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(valid.is_valid());

        let expired = SessionToken {
            expires_at: Utc::now() - Duration::seconds(1),
            ..valid
        };
        assert!(!expired.is_valid());
    }

    #[test]
    fn test_vendor_envelope_message() {
        let envelope: VendorEnvelope =
            serde_json::from_str(r#"{"code": 42, "msg": "boom"}"#).expect("should deserialize");
        assert_eq!(envelope.message(), "boom");

        let bare: VendorEnvelope =
            serde_json::from_str(r#"{"code": 42}"#).expect("should deserialize");
        assert_eq!(bare.message(), "vendor error code 42");
    }

    #[test]
    fn test_preset_deserialization_defaults_name() {
        let preset: Preset = serde_json::from_str(r#"{"id": 3}"#).expect("should deserialize");
        assert_eq!(preset.id, 3);
        assert!(preset.name.is_empty());
    }
}
