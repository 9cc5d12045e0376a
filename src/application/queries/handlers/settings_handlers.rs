//! Settings Query Handlers

use std::sync::Arc;

use crate::application::controls::ControlsStore;
use crate::application::emotion::EmotionAnalyzer;
use crate::application::error::ApplicationError;
use crate::application::ports::{EmotionAnalysis, SettingsStorePort};
use crate::application::queries::{GetDetectedEmotion, GetSettings};
use crate::domain::ProsodyControls;

/// 设置快照；凭证只回传是否存在，绝不回显明文
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub has_api_key: bool,
    pub selected_voice_id: Option<String>,
    pub saved_voice_ids: Vec<String>,
    pub smart_emotion: bool,
    pub controls: ProsodyControls,
}

/// GetSettings Handler
pub struct GetSettingsHandler {
    settings: Arc<dyn SettingsStorePort>,
    controls: Arc<ControlsStore>,
    analyzer: Arc<EmotionAnalyzer>,
}

impl GetSettingsHandler {
    pub fn new(
        settings: Arc<dyn SettingsStorePort>,
        controls: Arc<ControlsStore>,
        analyzer: Arc<EmotionAnalyzer>,
    ) -> Self {
        Self {
            settings,
            controls,
            analyzer,
        }
    }

    pub async fn handle(&self, _query: GetSettings) -> Result<SettingsView, ApplicationError> {
        Ok(SettingsView {
            has_api_key: self.settings.api_key().await?.is_some(),
            selected_voice_id: self.settings.selected_voice().await?,
            saved_voice_ids: self.settings.saved_voices().await?,
            smart_emotion: self.analyzer.is_enabled(),
            controls: self.controls.current().await,
        })
    }
}

/// 情感分析状态快照
#[derive(Debug, Clone)]
pub struct EmotionStatus {
    pub enabled: bool,
    pub analyzing: bool,
    pub latest: Option<EmotionAnalysis>,
}

/// GetDetectedEmotion Handler
pub struct GetDetectedEmotionHandler {
    analyzer: Arc<EmotionAnalyzer>,
}

impl GetDetectedEmotionHandler {
    pub fn new(analyzer: Arc<EmotionAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn handle(&self, _query: GetDetectedEmotion) -> EmotionStatus {
        EmotionStatus {
            enabled: self.analyzer.is_enabled(),
            analyzing: self.analyzer.is_analyzing(),
            latest: self.analyzer.latest().await,
        }
    }
}
