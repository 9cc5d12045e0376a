//! Settings Commands - 本地设置命令定义

use crate::domain::ControlUpdate;

/// 保存 API 凭证
#[derive(Debug, Clone)]
pub struct SetApiKey {
    pub key: String,
}

/// 清除 API 凭证
#[derive(Debug, Clone)]
pub struct ClearApiKey;

/// 选中音色
#[derive(Debug, Clone)]
pub struct SelectVoice {
    pub voice_id: String,
}

/// 切换音色收藏状态
#[derive(Debug, Clone)]
pub struct ToggleSavedVoice {
    pub voice_id: String,
}

/// 更新控制面板
#[derive(Debug, Clone)]
pub struct UpdateControls {
    pub update: ControlUpdate,
}

/// 开关智能情感模式
#[derive(Debug, Clone)]
pub struct SetSmartEmotion {
    pub enabled: bool,
}
