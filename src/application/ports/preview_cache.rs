//! Preview Cache Port - 试听音频缓存
//!
//! 按 voice_id 记忆化试听音频，避免重复网络请求。
//! 仅存活于进程生命周期内，不持久化；写入幂等（固定输入内容确定，后写覆盖无害）。

use crate::domain::AudioFormat;

/// 试听固定的示例台词
pub const PREVIEW_SAMPLE_TEXT: &str = "Hello, I am ready to create content for you.";

/// 缓存的试听音频
#[derive(Debug, Clone)]
pub struct PreviewAudio {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    pub duration_secs: f64,
}

/// Preview Cache Port
///
/// key 为 voice_id；同步接口即可（实现为进程内结构）
pub trait PreviewCachePort: Send + Sync {
    /// 命中返回缓存音频
    fn get(&self, voice_id: &str) -> Option<PreviewAudio>;

    /// 写入（后写覆盖）
    fn put(&self, voice_id: &str, audio: PreviewAudio);

    /// 是否已缓存
    fn contains(&self, voice_id: &str) -> bool;

    /// 缓存条目数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
