//! TTS Gateway Port - 上游 TTS 网关抽象
//!
//! 定义对第三方 TTS API 的抽象接口，具体实现在 infrastructure/adapters 层

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AudioFormat, ProsodyControls};

/// 网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP 401 - 凭证无效
    #[error("Unauthorized: API key rejected by gateway")]
    Auth,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Gateway error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// 音频载荷解码失败（base64 或响应体格式错误）
    #[error("Decode error: {0}")]
    Decode(String),
}

/// 语音生成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
    /// 情感预设；智能情感模式下为 None，由网关自行选择
    pub emotion_preset: Option<String>,
    pub emotion_intensity: f32,
    pub speed: f32,
    pub pitch: i32,
    /// 与 speed 同步（上游把二者分开，表现层始终镜像）
    pub tempo: f32,
    /// 上游模型标识
    pub model: String,
    /// 是否启用网关侧智能情感
    pub auto_emotion: bool,
    pub volume: u32,
    pub audio_format: AudioFormat,
}

impl SpeechRequest {
    /// 由韵律控制参数构建请求
    pub fn from_controls(
        text: impl Into<String>,
        voice_id: impl Into<String>,
        controls: &ProsodyControls,
        auto_emotion: bool,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            emotion_preset: if auto_emotion {
                None
            } else {
                Some(controls.emotion_preset.clone())
            },
            emotion_intensity: controls.emotion_intensity,
            speed: controls.speed,
            pitch: controls.pitch,
            tempo: controls.speed,
            model: DEFAULT_MODEL.to_string(),
            auto_emotion,
            volume: controls.volume,
            audio_format: controls.audio_format,
        }
    }
}

/// 上游唯一支持的模型
pub const DEFAULT_MODEL: &str = "ssfm-v21";

/// 语音生成结果
#[derive(Debug, Clone)]
pub struct SpeechResult {
    /// 解码后的音频字节
    pub audio: Vec<u8>,
    /// 音频时长（秒）
    pub duration_secs: f64,
    pub format: AudioFormat,
    /// 智能情感模式下网关回传的检测结果
    pub detected_emotion: Option<DetectedEmotion>,
}

/// 网关检测到的情感
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedEmotion {
    pub detected_emotion: String,
    pub confidence: f64,
}

/// 情感分析结果
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionAnalysis {
    pub detected_emotion: String,
    pub confidence: f64,
    #[serde(default)]
    pub scores: HashMap<String, f64>,
    #[serde(default)]
    pub sentences: Vec<SentenceEmotion>,
}

/// 单句情感
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceEmotion {
    pub text: String,
    pub emotion: String,
    pub confidence: f64,
}

/// 上游目录里的原始音色条目（规范化之前）
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceDescriptor {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub native_language: Option<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// TTS Gateway Port
///
/// 第三方 TTS API 的抽象接口；调用方不做任何自动重试
#[async_trait]
pub trait TtsGatewayPort: Send + Sync {
    /// 生成语音
    async fn generate(
        &self,
        api_key: &str,
        request: &SpeechRequest,
    ) -> Result<SpeechResult, GatewayError>;

    /// 拉取音色目录
    async fn fetch_voices(&self, api_key: &str) -> Result<Vec<VoiceDescriptor>, GatewayError>;

    /// 文本情感分析
    async fn analyze_emotion(&self, text: &str) -> Result<EmotionAnalysis, GatewayError>;
}
