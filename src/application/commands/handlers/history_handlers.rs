//! History Command Handlers - 历史维护

use std::sync::Arc;

use crate::application::commands::{ClearHistory, DeleteHistoryItem};
use crate::application::error::ApplicationError;
use crate::application::playback::PlaybackCoordinator;
use crate::application::ports::HistoryStorePort;

/// DeleteHistoryItem Handler
///
/// 删除正在播放的条目时同时释放播放槽
pub struct DeleteHistoryItemHandler {
    history: Arc<dyn HistoryStorePort>,
    playback: Arc<PlaybackCoordinator>,
}

impl DeleteHistoryItemHandler {
    pub fn new(history: Arc<dyn HistoryStorePort>, playback: Arc<PlaybackCoordinator>) -> Self {
        Self { history, playback }
    }

    pub async fn handle(&self, command: DeleteHistoryItem) -> Result<(), ApplicationError> {
        self.history.remove(&command.id).await?;

        if self.playback.current().await.as_deref() == Some(command.id.as_str()) {
            self.playback.stop().await;
        }

        tracing::info!(id = %command.id, "History entry deleted");
        Ok(())
    }
}

/// ClearHistory Handler
pub struct ClearHistoryHandler {
    history: Arc<dyn HistoryStorePort>,
    playback: Arc<PlaybackCoordinator>,
}

impl ClearHistoryHandler {
    pub fn new(history: Arc<dyn HistoryStorePort>, playback: Arc<PlaybackCoordinator>) -> Self {
        Self { history, playback }
    }

    pub async fn handle(&self, _command: ClearHistory) -> Result<(), ApplicationError> {
        self.history.clear().await?;
        self.playback.stop().await;
        tracing::info!("History cleared");
        Ok(())
    }
}
