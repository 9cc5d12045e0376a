//! Settings Queries - 设置与情感状态查询定义

/// 当前设置快照
#[derive(Debug, Clone)]
pub struct GetSettings;

/// 最近一次情感分析结果
#[derive(Debug, Clone)]
pub struct GetDetectedEmotion;
