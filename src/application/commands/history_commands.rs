//! History Commands - 历史维护命令定义

/// 删除单条历史
#[derive(Debug, Clone)]
pub struct DeleteHistoryItem {
    pub id: String,
}

/// 清空历史
#[derive(Debug, Clone)]
pub struct ClearHistory;
