//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod history_store;
mod preview_cache;
mod settings_store;
mod tts_gateway;

pub use history_store::{
    HistoryEntry, HistoryError, HistoryStorePort, DEFAULT_MAX_ITEMS, DEFAULT_RETENTION_DAYS,
};
pub use preview_cache::{PreviewAudio, PreviewCachePort, PREVIEW_SAMPLE_TEXT};
pub use settings_store::{SettingsError, SettingsStorePort};
pub use tts_gateway::{
    DetectedEmotion, EmotionAnalysis, GatewayError, SentenceEmotion, SpeechRequest, SpeechResult,
    TtsGatewayPort, VoiceDescriptor, DEFAULT_MODEL,
};
