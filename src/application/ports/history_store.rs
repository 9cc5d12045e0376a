//! History Store Port - 生成历史持久化
//!
//! 有界、按时间窗淘汰的历史集合：
//! - 最多保留 20 条，新条目在前
//! - 超过 7 天的条目在读取时剪除，并把剪除后的结果落盘
//! - 缺少时间戳的条目永不过期（兼容旧数据）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::AudioFormat;

/// 默认容量上限
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// 默认保留天数
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

/// History Store 错误
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History entry not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 生成历史条目
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// 唯一 ID
    pub id: String,
    /// 生成时的原始文本
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
    /// 解码后的音频字节
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    /// 实际使用的情感（智能模式下为检测结果，失败时 "auto"）
    pub emotion: String,
    /// 音频时长（秒）
    pub duration_secs: f64,
    /// 创建时间；None 表示旧数据，永不过期
    pub timestamp: Option<DateTime<Utc>>,
}

/// History Store Port
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// 追加条目；超出容量时淘汰最旧的
    async fn add(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;

    /// 删除单条
    async fn remove(&self, id: &str) -> Result<(), HistoryError>;

    /// 清空全部
    async fn clear(&self) -> Result<(), HistoryError>;

    /// 列出全部（新在前，≤ 容量上限）
    ///
    /// 读取时顺带剪除过期条目并持久化剪除结果
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// 按 ID 取单条（经过与 list 相同的过期剪除）
    async fn find(&self, id: &str) -> Result<Option<HistoryEntry>, HistoryError>;
}
