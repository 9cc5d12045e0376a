//! Data Transfer Objects

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use crate::application::commands::handlers::GenerateSpeechResponse;
use crate::application::ports::HistoryEntry;
use crate::application::queries::handlers::SettingsView;
use crate::domain::ProsodyControls;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Generate DTOs
// ============================================================================

/// 生成结果；音频以 base64 过线，与上游线格式一致
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub history_id: String,
    pub audio_base64: String,
    pub duration: f64,
    pub format: &'static str,
    pub emotion: String,
    pub voice_id: String,
    pub voice_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_emotion: Option<DetectedEmotionDto>,
}

#[derive(Debug, Serialize)]
pub struct DetectedEmotionDto {
    pub detected_emotion: String,
    pub confidence: f64,
}

impl From<GenerateSpeechResponse> for GenerateResponse {
    fn from(response: GenerateSpeechResponse) -> Self {
        Self {
            history_id: response.history_id,
            audio_base64: BASE64.encode(&response.audio),
            duration: response.duration_secs,
            format: response.format.as_str(),
            emotion: response.emotion,
            voice_id: response.voice_id,
            voice_name: response.voice_name,
            detected_emotion: response.detected_emotion.map(|d| DetectedEmotionDto {
                detected_emotion: d.detected_emotion,
                confidence: d.confidence,
            }),
        }
    }
}

// ============================================================================
// Playback DTOs
// ============================================================================

/// 试听/回放结果
#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    /// "playing" 或 "stopped"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    /// 被挤掉的前一个播放者
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<String>,
}

impl PlaybackResponse {
    pub fn playing(audio: &[u8], format: &'static str, stopped: Option<String>) -> Self {
        Self {
            status: "playing",
            audio_base64: Some(BASE64.encode(audio)),
            format: Some(format),
            stopped,
        }
    }

    pub fn stopped() -> Self {
        Self {
            status: "stopped",
            audio_base64: None,
            format: None,
            stopped: None,
        }
    }
}

// ============================================================================
// History DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HistoryItemResponse {
    pub id: String,
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
    pub audio_base64: String,
    pub format: &'static str,
    pub emotion: String,
    pub duration: f64,
    /// RFC 3339；旧数据为 None
    pub timestamp: Option<String>,
}

impl From<HistoryEntry> for HistoryItemResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            text: entry.text,
            voice_id: entry.voice_id,
            voice_name: entry.voice_name,
            audio_base64: BASE64.encode(&entry.audio),
            format: entry.format.as_str(),
            emotion: entry.emotion,
            duration: entry.duration_secs,
            timestamp: entry.timestamp.map(|t| t.to_rfc3339()),
        }
    }
}

// ============================================================================
// Settings DTOs
// ============================================================================

/// 设置快照；凭证只回传存在与否
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub has_api_key: bool,
    pub selected_voice_id: Option<String>,
    pub saved_voice_ids: Vec<String>,
    pub smart_emotion: bool,
    pub controls: ProsodyControls,
}

impl From<SettingsView> for SettingsResponse {
    fn from(view: SettingsView) -> Self {
        Self {
            has_api_key: view.has_api_key,
            selected_voice_id: view.selected_voice_id,
            saved_voice_ids: view.saved_voice_ids,
            smart_emotion: view.smart_emotion,
            controls: view.controls,
        }
    }
}
