//! Commands - 写侧命令与处理器

pub mod handlers;
mod history_commands;
mod settings_commands;
mod speech_commands;

pub use history_commands::{ClearHistory, DeleteHistoryItem};
pub use settings_commands::{
    ClearApiKey, SelectVoice, SetApiKey, SetSmartEmotion, ToggleSavedVoice, UpdateControls,
};
pub use speech_commands::{GenerateSpeech, PlayHistoryItem, PreviewVoice, StopPlayback};
