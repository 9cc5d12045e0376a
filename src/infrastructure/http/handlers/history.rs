//! History HTTP Handlers - 生成历史

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::commands::handlers::HistoryPlaybackOutcome;
use crate::application::commands::{ClearHistory, DeleteHistoryItem, PlayHistoryItem};
use crate::application::queries::ListHistory;
use crate::infrastructure::http::dto::{ApiResponse, Empty, HistoryItemResponse, PlaybackResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HistoryIdRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub total: usize,
    pub items: Vec<HistoryItemResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出历史（新在前；读取时裁剪过期条目）
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HistoryListResponse>>, ApiError> {
    let entries = state.list_history_handler.handle(ListHistory).await?;
    let items: Vec<HistoryItemResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(HistoryListResponse {
        total: items.len(),
        items,
    })))
}

/// 回放历史条目（toggle 语义）
pub async fn play_history_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryIdRequest>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let outcome = state
        .play_history_handler
        .handle(PlayHistoryItem { id: request.id })
        .await?;

    let response = match outcome {
        HistoryPlaybackOutcome::Playing {
            audio,
            format,
            stopped,
        } => PlaybackResponse::playing(&audio, format.as_str(), stopped),
        HistoryPlaybackOutcome::Stopped => PlaybackResponse::stopped(),
    };
    Ok(Json(ApiResponse::success(response)))
}

/// 删除单条历史
pub async fn delete_history_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryIdRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_history_handler
        .handle(DeleteHistoryItem { id: request.id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

/// 清空历史
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.clear_history_handler.handle(ClearHistory).await?;
    Ok(Json(ApiResponse::ok()))
}
