//! Playback Coordinator - 播放独占槽
//!
//! 全局最多允许一个音频在播放。获取槽位会先释放当前持有者；
//! 对正在播放的同一 ID 再次操作是"仅停止"（toggle 语义）。
//! 试听和历史回放共用同一个槽。

use tokio::sync::Mutex;

/// toggle 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// 新持有者已就位；stopped 为被挤掉的前任（如有）
    Started { stopped: Option<String> },
    /// 同 ID toggle，仅停止
    Stopped,
}

/// 播放独占槽
#[derive(Debug, Default)]
pub struct PlaybackCoordinator {
    current: Mutex<Option<String>>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求播放指定 ID
    ///
    /// 同 ID -> 停止；不同 ID -> 挤掉前任后占用
    pub async fn toggle(&self, id: &str) -> PlaybackOutcome {
        let mut current = self.current.lock().await;
        match current.as_deref() {
            Some(playing) if playing == id => {
                *current = None;
                tracing::debug!(id = %id, "Playback stopped (toggle)");
                PlaybackOutcome::Stopped
            }
            _ => {
                let stopped = current.replace(id.to_string());
                if let Some(prev) = &stopped {
                    tracing::debug!(stopped = %prev, started = %id, "Playback switched");
                }
                PlaybackOutcome::Started { stopped }
            }
        }
    }

    /// 无条件释放槽位，返回被停止的 ID
    pub async fn stop(&self) -> Option<String> {
        self.current.lock().await.take()
    }

    /// 当前持有者
    pub async fn current(&self) -> Option<String> {
        self.current.lock().await.clone()
    }
}
