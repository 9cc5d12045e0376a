//! Fake Gateway Client - 离线开发与测试用的假网关
//!
//! 不访问网络，返回确定性的假数据并记录调用次数

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{
    EmotionAnalysis, GatewayError, SpeechRequest, SpeechResult, TtsGatewayPort, VoiceDescriptor,
};

/// 假网关客户端
///
/// generate 返回由文本和音色拼出的假音频字节；
/// fetch_voices 返回固定的小目录；analyze_emotion 按标点猜情感
#[derive(Default)]
pub struct FakeGatewayClient {
    generate_calls: AtomicUsize,
}

impl FakeGatewayClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已发出的生成调用次数
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsGatewayPort for FakeGatewayClient {
    async fn generate(
        &self,
        _api_key: &str,
        request: &SpeechRequest,
    ) -> Result<SpeechResult, GatewayError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "Fake gateway generating speech"
        );

        Ok(SpeechResult {
            audio: format!("fake-audio:{}:{}", request.voice_id, request.text).into_bytes(),
            duration_secs: request.text.len() as f64 * 0.06,
            format: request.audio_format,
            detected_emotion: None,
        })
    }

    async fn fetch_voices(&self, _api_key: &str) -> Result<Vec<VoiceDescriptor>, GatewayError> {
        Ok(vec![
            fake_descriptor("fake_ava", "Ava", "en"),
            fake_descriptor("fake_mina", "Mina", "ko"),
            fake_descriptor("fake_yuki", "Yuki", "ja"),
        ])
    }

    async fn analyze_emotion(&self, text: &str) -> Result<EmotionAnalysis, GatewayError> {
        let detected = if text.contains('!') {
            "excited"
        } else if text.contains('?') {
            "curious"
        } else {
            "normal"
        };

        Ok(EmotionAnalysis {
            detected_emotion: detected.to_string(),
            confidence: 0.75,
            scores: HashMap::from([(detected.to_string(), 0.75)]),
            sentences: vec![],
        })
    }
}

fn fake_descriptor(id: &str, name: &str, language: &str) -> VoiceDescriptor {
    VoiceDescriptor {
        voice_id: id.to_string(),
        name: name.to_string(),
        emotions: vec![
            "normal".to_string(),
            "happy".to_string(),
            "sad".to_string(),
        ],
        languages: vec![language.to_string()],
        gender: Some("Female".to_string()),
        age_range: Some("young-adult".to_string()),
        image_url: None,
        native_language: Some(language.to_string()),
        styles: vec!["calm".to_string()],
        model: Some("fake-v1".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProsodyControls;

    #[tokio::test]
    async fn test_fake_generate_is_deterministic_and_counted() {
        let client = FakeGatewayClient::new();
        let request = SpeechRequest::from_controls("hi", "v1", &ProsodyControls::default(), false);

        let a = client.generate("k", &request).await.unwrap();
        let b = client.generate("k", &request).await.unwrap();

        assert_eq!(a.audio, b.audio);
        assert_eq!(client.generate_calls(), 2);
    }

    #[tokio::test]
    async fn test_fake_catalog_has_unique_ids() {
        let client = FakeGatewayClient::new();
        let voices = client.fetch_voices("k").await.unwrap();
        let mut ids: Vec<_> = voices.iter().map(|v| &v.voice_id).collect();
        ids.dedup();
        assert_eq!(ids.len(), voices.len());
    }
}
