//! Domain Layer - 领域层
//!
//! 包含:
//! - Voice Context: 音色目录、过滤引擎、过滤维度派生
//! - Prosody: 韵律控制参数与更新动作

pub mod voice;

mod prosody;

pub use prosody::{AudioFormat, ControlUpdate, ProsodyControls};
