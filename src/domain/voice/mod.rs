//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色目录条目与语言规范化
//! - 过滤引擎（纯逻辑）
//! - 过滤维度取值派生

mod catalog;
mod filters;

pub use catalog::{normalize_language, Voice};
pub use filters::{filter_voices, FacetIndex, VoiceFilters};
