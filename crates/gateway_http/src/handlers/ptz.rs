//! PTZ command handler
//!
//! Validates the request locally, then relays it to the vendor through the
//! cached cloud session. Issuing a command physically moves the camera:
//! the relay is deliberately not idempotent.

use axum::{Json, extract::State};
use reolink_cloud::{PtzCommand, PtzDirection};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::ValidatedJson;
use crate::state::AppState;

/// PTZ request body
#[derive(Debug, Deserialize, Validate)]
pub struct PtzRequest {
    /// Vendor UID of the target camera
    #[validate(length(min = 1, message = "must not be empty"))]
    pub camera_id: String,
    /// Movement direction; one of up, down, left, right, zoom-in, zoom-out, stop
    pub direction: PtzDirection,
    /// Movement speed, 1..=64
    #[validate(range(min = 1, max = 64, message = "must be between 1 and 64"))]
    pub speed: u8,
}

/// PTZ response envelope
#[derive(Debug, Serialize)]
pub struct PtzResponse {
    /// Whether the vendor accepted the command
    pub success: bool,
    /// Vendor response payload, relayed unchanged in shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Handle a PTZ command request
#[instrument(skip(state, request), fields(camera = %request.camera_id, direction = %request.direction, speed = request.speed))]
pub async fn ptz(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PtzRequest>,
) -> Result<Json<PtzResponse>, ApiError> {
    let command = PtzCommand {
        camera_uid: request.camera_id,
        direction: request.direction,
        speed: request.speed,
    };

    let data = state.cloud.ptz(&command).await?;

    Ok(Json(PtzResponse {
        success: true,
        data: Some(data),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptz_request_deserialize() {
        let json = r#"{"camera_id": "cam1", "direction": "left", "speed": 5}"#;
        let request: PtzRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.camera_id, "cam1");
        assert_eq!(request.direction, PtzDirection::Left);
        assert_eq!(request.speed, 5);
    }

    #[test]
    fn ptz_request_rejects_unknown_direction() {
        let json = r#"{"camera_id": "cam1", "direction": "sideways", "speed": 5}"#;
        assert!(serde_json::from_str::<PtzRequest>(json).is_err());
    }

    #[test]
    fn ptz_request_accepts_zoom_directions() {
        let json = r#"{"camera_id": "cam1", "direction": "zoom-in", "speed": 1}"#;
        let request: PtzRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.direction, PtzDirection::ZoomIn);
    }

    #[test]
    fn ptz_request_validates_speed_range() {
        let valid = PtzRequest {
            camera_id: "cam1".to_string(),
            direction: PtzDirection::Up,
            speed: 64,
        };
        assert!(valid.validate().is_ok());

        let too_slow = PtzRequest { speed: 0, ..valid };
        assert!(too_slow.validate().is_err());
    }

    #[test]
    fn ptz_request_validates_camera_id() {
        let request = PtzRequest {
            camera_id: String::new(),
            direction: PtzDirection::Stop,
            speed: 1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn ptz_response_serializes_data() {
        let response = PtzResponse {
            success: true,
            data: Some(serde_json::json!({"moved": true})),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains("moved"));
    }

    #[test]
    fn ptz_response_omits_missing_data() {
        let response = PtzResponse {
            success: true,
            data: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("data"));
    }
}
