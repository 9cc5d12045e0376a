//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::commands::handlers::{
    ClearApiKeyHandler, ClearHistoryHandler, DeleteHistoryItemHandler, GenerateSpeechHandler,
    PlayHistoryItemHandler, PreviewVoiceHandler, SelectVoiceHandler, SetApiKeyHandler,
    SetSmartEmotionHandler, StopPlaybackHandler, ToggleSavedVoiceHandler, UpdateControlsHandler,
};
use crate::application::ports::{
    HistoryStorePort, PreviewCachePort, SettingsStorePort, TtsGatewayPort,
};
use crate::application::queries::handlers::{
    GetDetectedEmotionHandler, GetFacetsHandler, GetSettingsHandler, ListHistoryHandler,
    ListVoicesHandler, RefreshVoicesHandler,
};
use crate::application::{ControlsStore, EmotionAnalyzer, PlaybackCoordinator, VoiceCatalogStore};

/// 应用状态
///
/// 目录、控制面板、播放槽和情感分析器为进程内共享组件，
/// 网关与存储以端口注入
pub struct AppState {
    // ========== Ports ==========
    pub gateway: Arc<dyn TtsGatewayPort>,
    pub settings: Arc<dyn SettingsStorePort>,
    pub history: Arc<dyn HistoryStorePort>,
    pub preview_cache: Arc<dyn PreviewCachePort>,

    // ========== 进程内组件 ==========
    pub catalog: Arc<VoiceCatalogStore>,
    pub controls: Arc<ControlsStore>,
    pub playback: Arc<PlaybackCoordinator>,
    pub analyzer: Arc<EmotionAnalyzer>,

    // ========== Command Handlers ==========
    pub generate_handler: GenerateSpeechHandler,
    pub preview_handler: PreviewVoiceHandler,
    pub stop_playback_handler: StopPlaybackHandler,
    pub play_history_handler: PlayHistoryItemHandler,
    pub delete_history_handler: DeleteHistoryItemHandler,
    pub clear_history_handler: ClearHistoryHandler,
    pub set_api_key_handler: SetApiKeyHandler,
    pub clear_api_key_handler: ClearApiKeyHandler,
    pub select_voice_handler: SelectVoiceHandler,
    pub toggle_saved_voice_handler: ToggleSavedVoiceHandler,
    pub update_controls_handler: UpdateControlsHandler,
    pub set_smart_emotion_handler: SetSmartEmotionHandler,

    // ========== Query Handlers ==========
    pub refresh_voices_handler: RefreshVoicesHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub get_facets_handler: GetFacetsHandler,
    pub list_history_handler: ListHistoryHandler,
    pub get_settings_handler: GetSettingsHandler,
    pub get_detected_emotion_handler: GetDetectedEmotionHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        gateway: Arc<dyn TtsGatewayPort>,
        settings: Arc<dyn SettingsStorePort>,
        history: Arc<dyn HistoryStorePort>,
        preview_cache: Arc<dyn PreviewCachePort>,
        analyzer: Arc<EmotionAnalyzer>,
    ) -> Self {
        let catalog = Arc::new(VoiceCatalogStore::new());
        let controls = Arc::new(ControlsStore::new());
        let playback = Arc::new(PlaybackCoordinator::new());

        Self {
            // Command handlers
            generate_handler: GenerateSpeechHandler::new(
                gateway.clone(),
                settings.clone(),
                history.clone(),
                catalog.clone(),
                controls.clone(),
                analyzer.clone(),
            ),
            preview_handler: PreviewVoiceHandler::new(
                gateway.clone(),
                settings.clone(),
                preview_cache.clone(),
                playback.clone(),
                catalog.clone(),
            ),
            stop_playback_handler: StopPlaybackHandler::new(playback.clone()),
            play_history_handler: PlayHistoryItemHandler::new(history.clone(), playback.clone()),
            delete_history_handler: DeleteHistoryItemHandler::new(
                history.clone(),
                playback.clone(),
            ),
            clear_history_handler: ClearHistoryHandler::new(history.clone(), playback.clone()),
            set_api_key_handler: SetApiKeyHandler::new(settings.clone()),
            clear_api_key_handler: ClearApiKeyHandler::new(settings.clone(), catalog.clone()),
            select_voice_handler: SelectVoiceHandler::new(settings.clone(), catalog.clone()),
            toggle_saved_voice_handler: ToggleSavedVoiceHandler::new(settings.clone()),
            update_controls_handler: UpdateControlsHandler::new(controls.clone()),
            set_smart_emotion_handler: SetSmartEmotionHandler::new(analyzer.clone()),

            // Query handlers
            refresh_voices_handler: RefreshVoicesHandler::new(
                gateway.clone(),
                settings.clone(),
                catalog.clone(),
            ),
            list_voices_handler: ListVoicesHandler::new(catalog.clone()),
            get_facets_handler: GetFacetsHandler::new(catalog.clone()),
            list_history_handler: ListHistoryHandler::new(history.clone()),
            get_settings_handler: GetSettingsHandler::new(
                settings.clone(),
                controls.clone(),
                analyzer.clone(),
            ),
            get_detected_emotion_handler: GetDetectedEmotionHandler::new(analyzer.clone()),

            // Ports
            gateway,
            settings,
            history,
            preview_cache,

            // 进程内组件
            catalog,
            controls,
            playback,
            analyzer,
        }
    }
}
