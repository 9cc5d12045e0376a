//! HTTP Gateway Client - 调用上游 TTS API
//!
//! 实现 TtsGatewayPort trait，通过 HTTP 调用上游 TTS 服务
//!
//! 上游 API:
//! POST {base}/generate         Header: x-api-key  Request/Response: JSON（音频为 base64）
//! GET  {base}/voices           Header: x-api-key
//! POST {base}/analyze-emotion  Request: {"text": "..."}

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    DetectedEmotion, EmotionAnalysis, GatewayError, SpeechRequest, SpeechResult, TtsGatewayPort,
    VoiceDescriptor,
};
use crate::domain::AudioFormat;

/// 生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateHttpRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion_preset: Option<&'a str>,
    emotion_intensity: f32,
    speed: f32,
    pitch: i32,
    tempo: f32,
    model: &'a str,
    auto_emotion: bool,
    volume: u32,
    audio_format: &'a str,
}

/// 生成响应体
#[derive(Debug, Deserialize)]
struct GenerateHttpResponse {
    audio_base64: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    detected_emotion: Option<DetectedEmotion>,
}

/// 情感分析请求体
#[derive(Debug, Serialize)]
struct AnalyzeHttpRequest<'a> {
    text: &'a str,
}

/// HTTP 网关客户端配置
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// 上游 API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.typecast.ai/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 网关客户端
///
/// 所有失败原样上抛，不做自动重试
pub struct HttpGatewayClient {
    client: Client,
    config: HttpGatewayConfig,
}

impl HttpGatewayClient {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.config.base_url)
    }

    fn voices_url(&self) -> String {
        format!("{}/voices", self.config.base_url)
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze-emotion", self.config.base_url)
    }
}

/// reqwest 传输层错误映射
fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Network(format!("Cannot connect to gateway: {}", e))
    } else {
        GatewayError::Network(e.to_string())
    }
}

/// 非 2xx 状态码映射；401 单独成 Auth
async fn map_status_error(response: reqwest::Response) -> GatewayError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return GatewayError::Auth;
    }
    let message = response.text().await.unwrap_or_default();
    GatewayError::Service {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl TtsGatewayPort for HttpGatewayClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &SpeechRequest,
    ) -> Result<SpeechResult, GatewayError> {
        let http_request = GenerateHttpRequest {
            text: &request.text,
            voice_id: &request.voice_id,
            emotion_preset: request.emotion_preset.as_deref(),
            emotion_intensity: request.emotion_intensity,
            speed: request.speed,
            pitch: request.pitch,
            tempo: request.tempo,
            model: &request.model,
            auto_emotion: request.auto_emotion,
            volume: request.volume,
            audio_format: request.audio_format.as_str(),
        };

        tracing::debug!(
            url = %self.generate_url(),
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            auto_emotion = request.auto_emotion,
            "Sending generate request"
        );

        let response = self
            .client
            .post(&self.generate_url())
            .header("x-api-key", api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(map_status_error(response).await);
        }

        let body: GenerateHttpResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Invalid generate response: {}", e)))?;

        let audio = BASE64
            .decode(&body.audio_base64)
            .map_err(|e| GatewayError::Decode(format!("Invalid audio base64: {}", e)))?;

        let format = body
            .format
            .as_deref()
            .map(AudioFormat::parse)
            .unwrap_or(request.audio_format);

        tracing::info!(
            voice_id = %request.voice_id,
            audio_size = audio.len(),
            duration_secs = body.duration,
            "Speech generation completed"
        );

        Ok(SpeechResult {
            audio,
            duration_secs: body.duration,
            format,
            detected_emotion: body.detected_emotion,
        })
    }

    async fn fetch_voices(&self, api_key: &str) -> Result<Vec<VoiceDescriptor>, GatewayError> {
        let response = self
            .client
            .get(&self.voices_url())
            .header("x-api-key", api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(map_status_error(response).await);
        }

        let voices: Vec<VoiceDescriptor> = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Invalid voices response: {}", e)))?;

        tracing::info!(voice_count = voices.len(), "Voice catalog fetched");
        Ok(voices)
    }

    async fn analyze_emotion(&self, text: &str) -> Result<EmotionAnalysis, GatewayError> {
        let response = self
            .client
            .post(&self.analyze_url())
            .json(&AnalyzeHttpRequest { text })
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(map_status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Invalid analysis response: {}", e)))
    }
}
