//! Query Handlers

pub mod history_handlers;
pub mod settings_handlers;
pub mod voice_handlers;

pub use history_handlers::ListHistoryHandler;
pub use settings_handlers::{
    EmotionStatus, GetDetectedEmotionHandler, GetSettingsHandler, SettingsView,
};
pub use voice_handlers::{GetFacetsHandler, ListVoicesHandler, RefreshVoicesHandler};
