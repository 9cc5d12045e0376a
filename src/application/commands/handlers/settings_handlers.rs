//! Settings Command Handlers - 凭证、选中音色、收藏与控制面板

use std::sync::Arc;

use crate::application::catalog_store::VoiceCatalogStore;
use crate::application::commands::{
    ClearApiKey, SelectVoice, SetApiKey, SetSmartEmotion, ToggleSavedVoice, UpdateControls,
};
use crate::application::controls::ControlsStore;
use crate::application::emotion::EmotionAnalyzer;
use crate::application::error::ApplicationError;
use crate::application::ports::SettingsStorePort;
use crate::domain::ProsodyControls;

/// SetApiKey Handler
pub struct SetApiKeyHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl SetApiKeyHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, command: SetApiKey) -> Result<(), ApplicationError> {
        let key = command.key.trim();
        if key.is_empty() {
            return Err(ApplicationError::validation("API key cannot be empty"));
        }
        self.settings.set_api_key(key).await?;
        tracing::info!("API key saved");
        Ok(())
    }
}

/// ClearApiKey Handler
///
/// 凭证清除后目录不再可信，一并清空
pub struct ClearApiKeyHandler {
    settings: Arc<dyn SettingsStorePort>,
    catalog: Arc<VoiceCatalogStore>,
}

impl ClearApiKeyHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>, catalog: Arc<VoiceCatalogStore>) -> Self {
        Self { settings, catalog }
    }

    pub async fn handle(&self, _command: ClearApiKey) -> Result<(), ApplicationError> {
        self.settings.clear_api_key().await?;
        self.catalog.replace(vec![]).await;
        tracing::info!("API key cleared, voice catalog dropped");
        Ok(())
    }
}

/// SelectVoice Handler
pub struct SelectVoiceHandler {
    settings: Arc<dyn SettingsStorePort>,
    catalog: Arc<VoiceCatalogStore>,
}

impl SelectVoiceHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>, catalog: Arc<VoiceCatalogStore>) -> Self {
        Self { settings, catalog }
    }

    pub async fn handle(&self, command: SelectVoice) -> Result<(), ApplicationError> {
        if self.catalog.find(&command.voice_id).await.is_none() {
            return Err(ApplicationError::not_found("Voice", command.voice_id));
        }
        self.settings.set_selected_voice(&command.voice_id).await?;
        tracing::info!(voice_id = %command.voice_id, "Voice selected");
        Ok(())
    }
}

/// ToggleSavedVoice Handler
pub struct ToggleSavedVoiceHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl ToggleSavedVoiceHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    /// 返回切换后的收藏状态
    pub async fn handle(&self, command: ToggleSavedVoice) -> Result<bool, ApplicationError> {
        let saved = self.settings.toggle_saved_voice(&command.voice_id).await?;
        tracing::debug!(voice_id = %command.voice_id, saved, "Saved voice toggled");
        Ok(saved)
    }
}

/// UpdateControls Handler
pub struct UpdateControlsHandler {
    controls: Arc<ControlsStore>,
}

impl UpdateControlsHandler {
    pub fn new(controls: Arc<ControlsStore>) -> Self {
        Self { controls }
    }

    pub async fn handle(&self, command: UpdateControls) -> Result<ProsodyControls, ApplicationError> {
        self.controls
            .apply(command.update)
            .await
            .map_err(ApplicationError::validation)
    }
}

/// SetSmartEmotion Handler
pub struct SetSmartEmotionHandler {
    analyzer: Arc<EmotionAnalyzer>,
}

impl SetSmartEmotionHandler {
    pub fn new(analyzer: Arc<EmotionAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn handle(&self, command: SetSmartEmotion) -> Result<(), ApplicationError> {
        self.analyzer.set_enabled(command.enabled).await;
        tracing::info!(enabled = command.enabled, "Smart emotion mode updated");
        Ok(())
    }
}
