//! Command Handlers

pub mod history_handlers;
pub mod settings_handlers;
pub mod speech_handlers;

pub use history_handlers::{ClearHistoryHandler, DeleteHistoryItemHandler};
pub use settings_handlers::{
    ClearApiKeyHandler, SelectVoiceHandler, SetApiKeyHandler, SetSmartEmotionHandler,
    ToggleSavedVoiceHandler, UpdateControlsHandler,
};
pub use speech_handlers::{
    GenerateSpeechHandler, GenerateSpeechResponse, HistoryPlaybackOutcome, PlayHistoryItemHandler,
    PreviewOutcome, PreviewVoiceHandler, StopPlaybackHandler,
};
