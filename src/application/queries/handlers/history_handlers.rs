//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{HistoryEntry, HistoryStorePort};
use crate::application::queries::ListHistory;

/// ListHistory Handler
///
/// 过期裁剪发生在存储实现的 list 内部，这里只透传
pub struct ListHistoryHandler {
    history: Arc<dyn HistoryStorePort>,
}

impl ListHistoryHandler {
    pub fn new(history: Arc<dyn HistoryStorePort>) -> Self {
        Self { history }
    }

    pub async fn handle(&self, _query: ListHistory) -> Result<Vec<HistoryEntry>, ApplicationError> {
        Ok(self.history.list().await?)
    }
}
