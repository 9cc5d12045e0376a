//! Settings HTTP Handlers - 凭证与控制面板

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::commands::{ClearApiKey, SetApiKey, UpdateControls};
use crate::application::queries::GetSettings;
use crate::domain::{ControlUpdate, ProsodyControls};
use crate::infrastructure::http::dto::{ApiResponse, Empty, SettingsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// 当前设置快照
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let view = state.get_settings_handler.handle(GetSettings).await?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// 保存 API 凭证
pub async fn set_api_key(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetApiKeyRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .set_api_key_handler
        .handle(SetApiKey {
            key: request.api_key,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

/// 清除 API 凭证
pub async fn clear_api_key(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.clear_api_key_handler.handle(ClearApiKey).await?;
    Ok(Json(ApiResponse::ok()))
}

/// 更新控制面板，返回更新后的完整状态
pub async fn update_controls(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ControlUpdate>,
) -> Result<Json<ApiResponse<ProsodyControls>>, ApiError> {
    let controls = state
        .update_controls_handler
        .handle(UpdateControls { update })
        .await?;
    Ok(Json(ApiResponse::success(controls)))
}
