//! Camera status and preset handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use reolink_cloud::{CameraStatus, Preset};

use crate::error::ApiError;
use crate::state::AppState;

/// Camera status response envelope
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub data: CameraStatus,
}

/// Preset list response envelope
#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub success: bool,
    pub data: Vec<Preset>,
}

/// Preset recall response envelope
#[derive(Debug, Serialize)]
pub struct RecallResponse {
    pub success: bool,
}

/// Fetch the cloud-reported status of a camera
#[instrument(skip(state), fields(camera = %camera_uid))]
pub async fn status(
    State(state): State<AppState>,
    Path(camera_uid): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let data = state.cloud.camera_status(&camera_uid).await?;
    Ok(Json(StatusResponse {
        success: true,
        data,
    }))
}

/// List the saved presets of a camera
#[instrument(skip(state), fields(camera = %camera_uid))]
pub async fn presets(
    State(state): State<AppState>,
    Path(camera_uid): Path<String>,
) -> Result<Json<PresetsResponse>, ApiError> {
    let data = state.cloud.list_presets(&camera_uid).await?;
    Ok(Json(PresetsResponse {
        success: true,
        data,
    }))
}

/// Move a camera to a saved preset
#[instrument(skip(state), fields(camera = %camera_uid, preset = preset_id))]
pub async fn recall_preset(
    State(state): State<AppState>,
    Path((camera_uid, preset_id)): Path<(String, u32)>,
) -> Result<Json<RecallResponse>, ApiError> {
    state.cloud.recall_preset(&camera_uid, preset_id).await?;
    Ok(Json(RecallResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_serialization() {
        let response = StatusResponse {
            success: true,
            data: CameraStatus {
                uid: "cam1".to_string(),
                name: "Front Door".to_string(),
                online: true,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains("Front Door"));
        assert!(json.contains(r#""online":true"#));
    }

    #[test]
    fn presets_response_serialization() {
        let response = PresetsResponse {
            success: true,
            data: vec![Preset {
                id: 1,
                name: "Gate".to_string(),
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Gate"));
    }

    #[test]
    fn recall_response_serialization() {
        let json = serde_json::to_string(&RecallResponse { success: true }).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
