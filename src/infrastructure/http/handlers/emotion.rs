//! Emotion HTTP Handlers - 智能情感模式

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::commands::SetSmartEmotion;
use crate::application::queries::GetDetectedEmotion;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SmartEmotionRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct EmotionStatusResponse {
    pub enabled: bool,
    pub analyzing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_emotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 提交文本做防抖情感分析
///
/// 立即返回；窗口静默后结果才可从 /latest 读到
pub async fn analyze_emotion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<ApiResponse<Empty>> {
    state.analyzer.submit(request.text).await;
    Json(ApiResponse::ok())
}

/// 最近一次分析结果
pub async fn latest_emotion(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<EmotionStatusResponse>> {
    let status = state
        .get_detected_emotion_handler
        .handle(GetDetectedEmotion)
        .await;

    let (detected_emotion, confidence) = match status.latest {
        Some(analysis) => (Some(analysis.detected_emotion), Some(analysis.confidence)),
        None => (None, None),
    };

    Json(ApiResponse::success(EmotionStatusResponse {
        enabled: status.enabled,
        analyzing: status.analyzing,
        detected_emotion,
        confidence,
    }))
}

/// 开关智能情感模式
pub async fn set_smart_emotion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SmartEmotionRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .set_smart_emotion_handler
        .handle(SetSmartEmotion {
            enabled: request.enabled,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
