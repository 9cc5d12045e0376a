//! 测试用的内存版端口实现

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::application::ports::{
    EmotionAnalysis, GatewayError, HistoryEntry, HistoryError, HistoryStorePort, PreviewAudio,
    PreviewCachePort, SettingsError, SettingsStorePort, SpeechRequest, SpeechResult,
    TtsGatewayPort,
};
use crate::domain::AudioFormat;

/// 固定返回成功结果的网关，记录调用次数
#[derive(Default)]
pub struct FakeGateway {
    generate_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsGatewayPort for FakeGateway {
    async fn generate(
        &self,
        _api_key: &str,
        request: &SpeechRequest,
    ) -> Result<SpeechResult, GatewayError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SpeechResult {
            audio: format!("audio:{}:{}", request.voice_id, request.text).into_bytes(),
            duration_secs: 1.5,
            format: AudioFormat::Wav,
            detected_emotion: None,
        })
    }

    async fn fetch_voices(
        &self,
        _api_key: &str,
    ) -> Result<Vec<crate::application::ports::VoiceDescriptor>, GatewayError> {
        Ok(vec![])
    }

    async fn analyze_emotion(&self, text: &str) -> Result<EmotionAnalysis, GatewayError> {
        Ok(EmotionAnalysis {
            detected_emotion: if text.contains('!') { "excited" } else { "normal" }.to_string(),
            confidence: 0.9,
            scores: HashMap::new(),
            sentences: vec![],
        })
    }
}

/// 总是失败的网关
pub struct FailingGateway {
    pub error_kind: fn() -> GatewayError,
}

impl Default for FailingGateway {
    fn default() -> Self {
        Self {
            error_kind: || GatewayError::Network("connection refused".to_string()),
        }
    }
}

#[async_trait]
impl TtsGatewayPort for FailingGateway {
    async fn generate(
        &self,
        _api_key: &str,
        _request: &SpeechRequest,
    ) -> Result<SpeechResult, GatewayError> {
        Err((self.error_kind)())
    }

    async fn fetch_voices(
        &self,
        _api_key: &str,
    ) -> Result<Vec<crate::application::ports::VoiceDescriptor>, GatewayError> {
        Err((self.error_kind)())
    }

    async fn analyze_emotion(&self, _text: &str) -> Result<EmotionAnalysis, GatewayError> {
        Err((self.error_kind)())
    }
}

/// 内存版试听缓存
#[derive(Default)]
pub struct InMemoryPreviewCache {
    entries: DashMap<String, PreviewAudio>,
}

impl InMemoryPreviewCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewCachePort for InMemoryPreviewCache {
    fn get(&self, voice_id: &str) -> Option<PreviewAudio> {
        self.entries.get(voice_id).map(|e| e.clone())
    }

    fn put(&self, voice_id: &str, audio: PreviewAudio) {
        self.entries.insert(voice_id.to_string(), audio);
    }

    fn contains(&self, voice_id: &str) -> bool {
        self.entries.contains_key(voice_id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 内存版设置存储
#[derive(Default)]
pub struct InMemorySettingsStore {
    state: Mutex<SettingsState>,
}

#[derive(Default)]
struct SettingsState {
    api_key: Option<String>,
    selected_voice: Option<String>,
    saved_voices: Vec<String>,
}

#[async_trait]
impl SettingsStorePort for InMemorySettingsStore {
    async fn api_key(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.state.lock().await.api_key.clone())
    }

    async fn set_api_key(&self, key: &str) -> Result<(), SettingsError> {
        self.state.lock().await.api_key = Some(key.to_string());
        Ok(())
    }

    async fn clear_api_key(&self) -> Result<(), SettingsError> {
        self.state.lock().await.api_key = None;
        Ok(())
    }

    async fn selected_voice(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.state.lock().await.selected_voice.clone())
    }

    async fn set_selected_voice(&self, voice_id: &str) -> Result<(), SettingsError> {
        self.state.lock().await.selected_voice = Some(voice_id.to_string());
        Ok(())
    }

    async fn saved_voices(&self) -> Result<Vec<String>, SettingsError> {
        Ok(self.state.lock().await.saved_voices.clone())
    }

    async fn toggle_saved_voice(&self, voice_id: &str) -> Result<bool, SettingsError> {
        let mut state = self.state.lock().await;
        if let Some(pos) = state.saved_voices.iter().position(|v| v == voice_id) {
            state.saved_voices.remove(pos);
            Ok(false)
        } else {
            state.saved_voices.push(voice_id.to_string());
            Ok(true)
        }
    }
}

/// 内存版历史存储，不做条数和时效裁剪
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl HistoryStorePort for InMemoryHistoryStore {
    async fn add(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.entries.lock().await.clear();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.entries.lock().await.clone();
        entries.reverse();
        Ok(entries)
    }

    async fn find(&self, id: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }
}

/// 预置了 API key 的设置存储和空历史存储
pub async fn seeded_stores() -> (Arc<InMemorySettingsStore>, Arc<InMemoryHistoryStore>) {
    let settings = Arc::new(InMemorySettingsStore::default());
    settings.set_api_key("test-api-key").await.unwrap();
    (settings, Arc::new(InMemoryHistoryStore::default()))
}
