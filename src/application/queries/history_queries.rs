//! History Queries - 历史查询定义

/// 列出历史（最新在前，读取时裁剪过期条目）
#[derive(Debug, Clone)]
pub struct ListHistory;
