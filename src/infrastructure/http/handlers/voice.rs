//! Voice HTTP Handlers - 目录、选择、收藏与试听

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::commands::handlers::PreviewOutcome;
use crate::application::commands::{PreviewVoice, SelectVoice, StopPlayback, ToggleSavedVoice};
use crate::application::queries::{GetFacets, ListVoices, RefreshVoices};
use crate::domain::voice::{FacetIndex, Voice, VoiceFilters};
use crate::infrastructure::http::dto::{ApiResponse, Empty, PlaybackResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub total: usize,
    pub voices: Vec<Voice>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceIdRequest {
    pub voice_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub voice_id: String,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    /// 停止前的播放者
    pub stopped: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 从上游拉取并替换音色目录
pub async fn refresh_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<VoiceListResponse>>, ApiError> {
    let voices = state.refresh_voices_handler.handle(RefreshVoices).await?;
    Ok(Json(ApiResponse::success(VoiceListResponse {
        total: voices.len(),
        voices,
    })))
}

/// 列出目录
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<VoiceListResponse>> {
    let voices = state.list_voices_handler.handle(ListVoices::default()).await;
    Json(ApiResponse::success(VoiceListResponse {
        total: voices.len(),
        voices,
    }))
}

/// 按过滤条件列出目录
pub async fn filter_voices(
    State(state): State<Arc<AppState>>,
    Json(filters): Json<VoiceFilters>,
) -> Json<ApiResponse<VoiceListResponse>> {
    let voices = state
        .list_voices_handler
        .handle(ListVoices {
            filters: Some(filters),
        })
        .await;
    Json(ApiResponse::success(VoiceListResponse {
        total: voices.len(),
        voices,
    }))
}

/// 当前过滤维度取值
pub async fn get_facets(State(state): State<Arc<AppState>>) -> Json<ApiResponse<FacetIndex>> {
    let facets = state.get_facets_handler.handle(GetFacets).await;
    Json(ApiResponse::success(facets))
}

/// 选中音色
pub async fn select_voice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoiceIdRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .select_voice_handler
        .handle(SelectVoice {
            voice_id: request.voice_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

/// 切换音色收藏
pub async fn bookmark_voice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoiceIdRequest>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    let saved = state
        .toggle_saved_voice_handler
        .handle(ToggleSavedVoice {
            voice_id: request.voice_id.clone(),
        })
        .await?;
    Ok(Json(ApiResponse::success(BookmarkResponse {
        voice_id: request.voice_id,
        saved,
    })))
}

/// 试听音色（toggle 语义）
pub async fn preview_voice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoiceIdRequest>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let outcome = state
        .preview_handler
        .handle(PreviewVoice {
            voice_id: request.voice_id,
        })
        .await?;

    let response = match outcome {
        PreviewOutcome::Playing { audio, stopped } => {
            PlaybackResponse::playing(&audio.audio, audio.format.as_str(), stopped)
        }
        PreviewOutcome::Stopped => PlaybackResponse::stopped(),
    };
    Ok(Json(ApiResponse::success(response)))
}

/// 停止当前播放
pub async fn stop_playback(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<StopResponse>> {
    let stopped = state.stop_playback_handler.handle(StopPlayback).await;
    Json(ApiResponse::success(StopResponse { stopped }))
}
