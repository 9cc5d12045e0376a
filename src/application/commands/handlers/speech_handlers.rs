//! Speech Command Handlers - 生成、试听、播放

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::catalog_store::VoiceCatalogStore;
use crate::application::commands::{GenerateSpeech, PlayHistoryItem, PreviewVoice, StopPlayback};
use crate::application::controls::ControlsStore;
use crate::application::emotion::EmotionAnalyzer;
use crate::application::error::ApplicationError;
use crate::application::playback::{PlaybackCoordinator, PlaybackOutcome};
use crate::application::ports::{
    DetectedEmotion, GatewayError, HistoryEntry, HistoryStorePort, PreviewAudio, PreviewCachePort,
    SettingsStorePort, SpeechRequest, TtsGatewayPort, PREVIEW_SAMPLE_TEXT,
};
use crate::domain::{AudioFormat, ProsodyControls};

// ============================================================================
// GenerateSpeech
// ============================================================================

/// 生成响应
#[derive(Debug, Clone)]
pub struct GenerateSpeechResponse {
    /// 新建的历史条目 ID
    pub history_id: String,
    pub audio: Vec<u8>,
    pub duration_secs: f64,
    pub format: AudioFormat,
    /// 实际使用的情感
    pub emotion: String,
    pub voice_id: String,
    pub voice_name: String,
    /// 智能模式下网关的检测结果
    pub detected_emotion: Option<DetectedEmotion>,
}

/// GenerateSpeech Handler
///
/// 编排一次完整生成：取凭证 -> 组装请求 -> 调网关 -> 记录历史。
/// 网关报 401 时清除存储的凭证（强制重新输入）；任何失败都不自动重试。
pub struct GenerateSpeechHandler {
    gateway: Arc<dyn TtsGatewayPort>,
    settings: Arc<dyn SettingsStorePort>,
    history: Arc<dyn HistoryStorePort>,
    catalog: Arc<VoiceCatalogStore>,
    controls: Arc<ControlsStore>,
    analyzer: Arc<EmotionAnalyzer>,
}

impl GenerateSpeechHandler {
    pub fn new(
        gateway: Arc<dyn TtsGatewayPort>,
        settings: Arc<dyn SettingsStorePort>,
        history: Arc<dyn HistoryStorePort>,
        catalog: Arc<VoiceCatalogStore>,
        controls: Arc<ControlsStore>,
        analyzer: Arc<EmotionAnalyzer>,
    ) -> Self {
        Self {
            gateway,
            settings,
            history,
            catalog,
            controls,
            analyzer,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        let api_key = self
            .settings
            .api_key()
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("API key not configured"))?;

        // 未显式指定音色时回退到持久化的选中音色
        let voice_id = match command.voice_id {
            Some(id) => id,
            None => self
                .settings
                .selected_voice()
                .await?
                .ok_or_else(|| ApplicationError::validation("No voice selected"))?,
        };

        let voice_name = self
            .catalog
            .find(&voice_id)
            .await
            .map(|v| v.name)
            .unwrap_or_else(|| "Unknown Voice".to_string());

        let controls = self.controls.current().await;
        let smart_emotion = self.analyzer.is_enabled();
        let request =
            SpeechRequest::from_controls(&command.text, &voice_id, &controls, smart_emotion);

        let result = match self.gateway.generate(&api_key, &request).await {
            Ok(result) => result,
            Err(GatewayError::Auth) => {
                // 凭证被拒：清除存储的 key，强制用户重新输入
                self.settings.clear_api_key().await?;
                tracing::warn!("Gateway rejected API key, stored credential cleared");
                return Err(GatewayError::Auth.into());
            }
            Err(e) => return Err(e.into()),
        };

        let emotion = effective_emotion(&controls, smart_emotion, result.detected_emotion.as_ref());

        let entry = HistoryEntry {
            id: format!("gen_{}", Uuid::new_v4()),
            text: command.text.clone(),
            voice_id: voice_id.clone(),
            voice_name: voice_name.clone(),
            audio: result.audio.clone(),
            format: result.format,
            emotion: emotion.clone(),
            duration_secs: result.duration_secs,
            timestamp: Some(Utc::now()),
        };
        self.history.add(&entry).await?;

        tracing::info!(
            history_id = %entry.id,
            voice_id = %voice_id,
            text_len = command.text.len(),
            duration_secs = result.duration_secs,
            smart_emotion,
            "Speech generated"
        );

        Ok(GenerateSpeechResponse {
            history_id: entry.id,
            audio: result.audio,
            duration_secs: result.duration_secs,
            format: result.format,
            emotion,
            voice_id,
            voice_name,
            detected_emotion: result.detected_emotion,
        })
    }
}

/// 记入历史的实际情感：智能模式下取检测结果（缺省 "auto"），否则取预设
fn effective_emotion(
    controls: &ProsodyControls,
    smart_emotion: bool,
    detected: Option<&DetectedEmotion>,
) -> String {
    if smart_emotion {
        detected
            .map(|d| d.detected_emotion.clone())
            .unwrap_or_else(|| "auto".to_string())
    } else {
        controls.emotion_preset.clone()
    }
}

// ============================================================================
// PreviewVoice
// ============================================================================

/// 试听结果
#[derive(Debug, Clone)]
pub enum PreviewOutcome {
    /// 开始播放；stopped 为被挤掉的前一个播放者
    Playing {
        audio: PreviewAudio,
        stopped: Option<String>,
    },
    /// 同音色 toggle，仅停止
    Stopped,
}

/// PreviewVoice Handler
///
/// 缓存命中直接播放；未命中用固定台词 + 默认韵律发一次生成请求，
/// 解码结果按 voice_id 写入缓存（写入幂等，后写覆盖）。
/// 对正在播放的同一音色再次请求是"仅停止"，不产生网络调用。
pub struct PreviewVoiceHandler {
    gateway: Arc<dyn TtsGatewayPort>,
    settings: Arc<dyn SettingsStorePort>,
    cache: Arc<dyn PreviewCachePort>,
    playback: Arc<PlaybackCoordinator>,
    catalog: Arc<VoiceCatalogStore>,
}

impl PreviewVoiceHandler {
    pub fn new(
        gateway: Arc<dyn TtsGatewayPort>,
        settings: Arc<dyn SettingsStorePort>,
        cache: Arc<dyn PreviewCachePort>,
        playback: Arc<PlaybackCoordinator>,
        catalog: Arc<VoiceCatalogStore>,
    ) -> Self {
        Self {
            gateway,
            settings,
            cache,
            playback,
            catalog,
        }
    }

    pub async fn handle(&self, command: PreviewVoice) -> Result<PreviewOutcome, ApplicationError> {
        let voice_id = command.voice_id;

        // 同音色 toggle：停止即返回，不触碰缓存和网络
        if self.playback.current().await.as_deref() == Some(voice_id.as_str()) {
            self.playback.stop().await;
            return Ok(PreviewOutcome::Stopped);
        }

        if self.catalog.find(&voice_id).await.is_none() {
            return Err(ApplicationError::not_found("Voice", voice_id));
        }

        let audio = match self.cache.get(&voice_id) {
            Some(audio) => {
                tracing::debug!(voice_id = %voice_id, "Preview cache hit");
                audio
            }
            None => {
                let audio = self.fetch_preview(&voice_id).await?;
                // 并发未命中允许竞争；内容对固定输入确定，后写覆盖无害
                self.cache.put(&voice_id, audio.clone());
                audio
            }
        };

        match self.playback.toggle(&voice_id).await {
            PlaybackOutcome::Started { stopped } => Ok(PreviewOutcome::Playing { audio, stopped }),
            // 在 fetch 期间别处把同 ID 放进了槽位，toggle 退化为停止
            PlaybackOutcome::Stopped => Ok(PreviewOutcome::Stopped),
        }
    }

    async fn fetch_preview(&self, voice_id: &str) -> Result<PreviewAudio, ApplicationError> {
        let api_key = self
            .settings
            .api_key()
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("API key not configured"))?;

        let request = SpeechRequest::from_controls(
            PREVIEW_SAMPLE_TEXT,
            voice_id,
            &ProsodyControls::default(),
            false,
        );

        let result = self.gateway.generate(&api_key, &request).await?;

        tracing::info!(
            voice_id = %voice_id,
            audio_size = result.audio.len(),
            "Preview fetched and cached"
        );

        Ok(PreviewAudio {
            audio: result.audio,
            format: result.format,
            duration_secs: result.duration_secs,
        })
    }
}

// ============================================================================
// StopPlayback
// ============================================================================

/// StopPlayback Handler
pub struct StopPlaybackHandler {
    playback: Arc<PlaybackCoordinator>,
}

impl StopPlaybackHandler {
    pub fn new(playback: Arc<PlaybackCoordinator>) -> Self {
        Self { playback }
    }

    pub async fn handle(&self, _command: StopPlayback) -> Option<String> {
        self.playback.stop().await
    }
}

// ============================================================================
// PlayHistoryItem
// ============================================================================

/// 历史回放结果
#[derive(Debug, Clone)]
pub enum HistoryPlaybackOutcome {
    Playing {
        audio: Vec<u8>,
        format: AudioFormat,
        stopped: Option<String>,
    },
    Stopped,
}

/// PlayHistoryItem Handler
///
/// 历史回放与试听共用同一个播放独占槽
pub struct PlayHistoryItemHandler {
    history: Arc<dyn HistoryStorePort>,
    playback: Arc<PlaybackCoordinator>,
}

impl PlayHistoryItemHandler {
    pub fn new(history: Arc<dyn HistoryStorePort>, playback: Arc<PlaybackCoordinator>) -> Self {
        Self { history, playback }
    }

    pub async fn handle(
        &self,
        command: PlayHistoryItem,
    ) -> Result<HistoryPlaybackOutcome, ApplicationError> {
        let entry = self
            .history
            .find(&command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("History entry", command.id.clone()))?;

        match self.playback.toggle(&entry.id).await {
            PlaybackOutcome::Started { stopped } => Ok(HistoryPlaybackOutcome::Playing {
                audio: entry.audio,
                format: entry.format,
                stopped,
            }),
            PlaybackOutcome::Stopped => Ok(HistoryPlaybackOutcome::Stopped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::emotion::DEFAULT_DEBOUNCE;
    use crate::application::test_support::{
        seeded_stores, FailingGateway, FakeGateway, InMemoryPreviewCache,
    };
    use crate::domain::voice::Voice;

    async fn catalog_with(ids: &[&str]) -> Arc<VoiceCatalogStore> {
        let store = Arc::new(VoiceCatalogStore::new());
        let voices: Vec<Voice> = ids
            .iter()
            .map(|id| Voice {
                voice_id: id.to_string(),
                name: format!("Voice {}", id),
                emotions: vec!["normal".to_string()],
                languages: vec!["en".to_string()],
                gender: Some("Female".to_string()),
                age_range: None,
                image_url: None,
                native_language: Some("en".to_string()),
                styles: vec![],
                model: None,
            })
            .collect();
        store.replace(voices).await;
        store
    }

    async fn preview_handler(
        gateway: Arc<FakeGateway>,
        cache: Arc<InMemoryPreviewCache>,
        playback: Arc<PlaybackCoordinator>,
    ) -> PreviewVoiceHandler {
        let (settings, _) = seeded_stores().await;
        let catalog = catalog_with(&["v1", "v2"]).await;
        PreviewVoiceHandler::new(gateway, settings, cache, playback, catalog)
    }

    async fn generate_handler(
        gateway: Arc<dyn TtsGatewayPort>,
    ) -> (
        GenerateSpeechHandler,
        Arc<crate::application::test_support::InMemorySettingsStore>,
        Arc<crate::application::test_support::InMemoryHistoryStore>,
    ) {
        let (settings, history) = seeded_stores().await;
        settings.set_selected_voice("v1").await.unwrap();
        let analyzer = Arc::new(EmotionAnalyzer::new(gateway.clone(), DEFAULT_DEBOUNCE));
        let handler = GenerateSpeechHandler::new(
            gateway,
            settings.clone(),
            history.clone(),
            catalog_with(&["v1", "v2"]).await,
            Arc::new(ControlsStore::new()),
            analyzer,
        );
        (handler, settings, history)
    }

    #[tokio::test]
    async fn test_generate_records_history_entry() {
        let (handler, _, history) = generate_handler(Arc::new(FakeGateway::default())).await;

        let response = handler
            .handle(GenerateSpeech {
                text: "hello world".to_string(),
                voice_id: None,
            })
            .await
            .unwrap();

        assert!(response.history_id.starts_with("gen_"));
        assert_eq!(response.voice_id, "v1");
        assert_eq!(response.emotion, "normal");

        let entries = history.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, response.history_id);
        assert_eq!(entries[0].text, "hello world");
        assert!(entries[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn test_generate_blank_text_rejected() {
        let (handler, _, history) = generate_handler(Arc::new(FakeGateway::default())).await;

        let err = handler
            .handle(GenerateSpeech {
                text: "   ".to_string(),
                voice_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_auth_failure_clears_stored_key() {
        let gateway = Arc::new(FailingGateway {
            error_kind: || GatewayError::Auth,
        });
        let (handler, settings, history) = generate_handler(gateway).await;

        let err = handler
            .handle(GenerateSpeech {
                text: "hello".to_string(),
                voice_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Unauthorized(_)));
        assert_eq!(settings.api_key().await.unwrap(), None);
        assert!(history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_network_failure_keeps_key_and_history_untouched() {
        let (handler, settings, history) =
            generate_handler(Arc::new(FailingGateway::default())).await;

        let err = handler
            .handle(GenerateSpeech {
                text: "hello".to_string(),
                voice_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::GatewayError(_)));
        assert!(settings.api_key().await.unwrap().is_some());
        assert!(history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_preview_for_same_voice_is_cache_hit() {
        let gateway = Arc::new(FakeGateway::default());
        let cache = Arc::new(InMemoryPreviewCache::new());
        let playback = Arc::new(PlaybackCoordinator::new());
        let handler = preview_handler(gateway.clone(), cache.clone(), playback.clone()).await;

        handler
            .handle(PreviewVoice {
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();
        // toggle 掉当前播放，第二次请求走缓存而不是网络
        playback.stop().await;
        handler
            .handle(PreviewVoice {
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(gateway.generate_calls(), 1);
        assert!(cache.contains("v1"));
    }

    #[tokio::test]
    async fn test_preview_b_while_a_playing_swaps_holder() {
        let gateway = Arc::new(FakeGateway::default());
        let cache = Arc::new(InMemoryPreviewCache::new());
        let playback = Arc::new(PlaybackCoordinator::new());
        let handler = preview_handler(gateway.clone(), cache.clone(), playback.clone()).await;

        handler
            .handle(PreviewVoice {
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();
        let outcome = handler
            .handle(PreviewVoice {
                voice_id: "v2".to_string(),
            })
            .await
            .unwrap();

        match outcome {
            PreviewOutcome::Playing { stopped, .. } => {
                assert_eq!(stopped.as_deref(), Some("v1"));
            }
            PreviewOutcome::Stopped => panic!("expected playback to start"),
        }
        assert_eq!(playback.current().await.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_same_voice_toggle_stops_without_network() {
        let gateway = Arc::new(FakeGateway::default());
        let cache = Arc::new(InMemoryPreviewCache::new());
        let playback = Arc::new(PlaybackCoordinator::new());
        let handler = preview_handler(gateway.clone(), cache.clone(), playback.clone()).await;

        handler
            .handle(PreviewVoice {
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();
        let calls_after_first = gateway.generate_calls();

        let outcome = handler
            .handle(PreviewVoice {
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(outcome, PreviewOutcome::Stopped));
        assert_eq!(gateway.generate_calls(), calls_after_first);
        assert_eq!(playback.current().await, None);
    }

    #[tokio::test]
    async fn test_preview_unknown_voice_is_not_found() {
        let gateway = Arc::new(FakeGateway::default());
        let cache = Arc::new(InMemoryPreviewCache::new());
        let playback = Arc::new(PlaybackCoordinator::new());
        let handler = preview_handler(gateway, cache, playback).await;

        let err = handler
            .handle(PreviewVoice {
                voice_id: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
