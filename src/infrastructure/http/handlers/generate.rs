//! Generate HTTP Handler - 语音生成

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::commands::GenerateSpeech;
use crate::infrastructure::http::dto::{ApiResponse, GenerateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    /// 缺省时使用持久化的选中音色
    #[serde(default)]
    pub voice_id: Option<String>,
}

/// 生成语音并记录历史
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GenerateResponse>>, ApiError> {
    let response = state
        .generate_handler
        .handle(GenerateSpeech {
            text: request.text,
            voice_id: request.voice_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(response.into())))
}
