//! Controls Store - 当前韵律控制状态
//!
//! 表现层可见的控制面板状态，进程内共享；更新走带标签的动作枚举。

use tokio::sync::RwLock;

use crate::domain::{ControlUpdate, ProsodyControls};

/// 控制面板状态持有者
#[derive(Debug, Default)]
pub struct ControlsStore {
    inner: RwLock<ProsodyControls>,
}

impl ControlsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前控制参数快照
    pub async fn current(&self) -> ProsodyControls {
        self.inner.read().await.clone()
    }

    /// 应用一个更新动作，返回更新后的状态
    pub async fn apply(&self, update: ControlUpdate) -> Result<ProsodyControls, &'static str> {
        let mut inner = self.inner.write().await;
        inner.apply(update)?;
        Ok(inner.clone())
    }
}
