//! Settings Store Port - 本地设置持久化
//!
//! 跨会话保存的本地状态：上游 API 凭证、当前选中的音色、收藏音色集合。
//! 每项都在固定的已知 key 下读写。

use async_trait::async_trait;
use thiserror::Error;

/// Settings Store 错误
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Settings Store Port
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    /// 读取 API 凭证
    async fn api_key(&self) -> Result<Option<String>, SettingsError>;

    /// 写入 API 凭证
    async fn set_api_key(&self, key: &str) -> Result<(), SettingsError>;

    /// 清除 API 凭证（401 时强制重新输入）
    async fn clear_api_key(&self) -> Result<(), SettingsError>;

    /// 当前选中的音色 ID
    async fn selected_voice(&self) -> Result<Option<String>, SettingsError>;

    /// 设置选中音色
    async fn set_selected_voice(&self, voice_id: &str) -> Result<(), SettingsError>;

    /// 收藏音色 ID 集合
    async fn saved_voices(&self) -> Result<Vec<String>, SettingsError>;

    /// 切换收藏状态，返回切换后是否为收藏
    async fn toggle_saved_voice(&self, voice_id: &str) -> Result<bool, SettingsError>;
}
