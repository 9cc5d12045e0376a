//! Speech Commands - 生成与试听命令定义

/// 生成语音
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    /// 要合成的文本
    pub text: String,
    /// 指定音色；None 时使用持久化的选中音色
    pub voice_id: Option<String>,
}

/// 试听音色（toggle 语义）
#[derive(Debug, Clone)]
pub struct PreviewVoice {
    pub voice_id: String,
}

/// 停止当前播放
#[derive(Debug, Clone)]
pub struct StopPlayback;

/// 回放历史条目（toggle 语义）
#[derive(Debug, Clone)]
pub struct PlayHistoryItem {
    pub id: String,
}
