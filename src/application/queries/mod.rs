//! Queries - 读侧查询与处理器

pub mod handlers;
mod history_queries;
mod settings_queries;
mod voice_queries;

pub use history_queries::ListHistory;
pub use settings_queries::{GetDetectedEmotion, GetSettings};
pub use voice_queries::{GetFacets, ListVoices, RefreshVoices};
