//! Application 层 - 命令/查询处理器与端口定义
//!
//! 写侧在 commands/，读侧在 queries/；对外部世界的依赖全部收敛在 ports/ 的
//! trait 后面，由 infrastructure 层注入实现。

pub mod catalog_store;
pub mod commands;
pub mod controls;
pub mod emotion;
pub mod error;
pub mod playback;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub mod test_support;

pub use catalog_store::VoiceCatalogStore;
pub use controls::ControlsStore;
pub use emotion::EmotionAnalyzer;
pub use error::ApplicationError;
pub use playback::{PlaybackCoordinator, PlaybackOutcome};
