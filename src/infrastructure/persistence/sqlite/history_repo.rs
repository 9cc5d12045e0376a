//! SQLite History Store - 生成历史仓储
//!
//! 容量与时效都在 SQL 里裁剪：写入后按 rowid 倒序保留最新 N 条，
//! 读取前删除超过保留期的条目（timestamp 为 NULL 的旧数据除外）。

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

use super::database::DbPool;
use crate::application::ports::{
    HistoryEntry, HistoryError, HistoryStorePort, DEFAULT_MAX_ITEMS, DEFAULT_RETENTION_DAYS,
};
use crate::domain::AudioFormat;

/// 数据库行
#[derive(Debug, FromRow)]
struct HistoryRow {
    id: String,
    text: String,
    voice_id: String,
    voice_name: String,
    audio: Vec<u8>,
    format: String,
    emotion: String,
    duration_secs: f64,
    /// unix 毫秒；NULL 表示旧数据
    timestamp: Option<i64>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            voice_id: row.voice_id,
            voice_name: row.voice_name,
            audio: row.audio,
            format: AudioFormat::parse(&row.format),
            emotion: row.emotion,
            duration_secs: row.duration_secs,
            timestamp: row.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

/// SQLite 历史仓储
pub struct SqliteHistoryStore {
    pool: DbPool,
    max_items: usize,
    retention_days: i64,
}

impl SqliteHistoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            max_items: DEFAULT_MAX_ITEMS,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn with_limits(pool: DbPool, max_items: usize, retention_days: i64) -> Self {
        Self {
            pool,
            max_items,
            retention_days,
        }
    }

    /// 删除超过保留期的条目；NULL 时间戳不参与
    async fn prune_expired(&self) -> Result<(), HistoryError> {
        let cutoff = (Utc::now() - Duration::days(self.retention_days)).timestamp_millis();
        let result = sqlx::query("DELETE FROM history WHERE timestamp IS NOT NULL AND timestamp < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() > 0 {
            tracing::debug!(pruned = result.rows_affected(), "Expired history entries pruned");
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStorePort for SqliteHistoryStore {
    async fn add(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        sqlx::query(
            r#"
            INSERT INTO history (id, text, voice_id, voice_name, audio, format, emotion, duration_secs, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.text)
        .bind(&entry.voice_id)
        .bind(&entry.voice_name)
        .bind(&entry.audio)
        .bind(entry.format.as_str())
        .bind(&entry.emotion)
        .bind(entry.duration_secs)
        .bind(entry.timestamp.map(|t| t.timestamp_millis()))
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        // 容量裁剪：按插入顺序保留最新的 max_items 条
        sqlx::query(
            r#"
            DELETE FROM history
            WHERE rowid NOT IN (SELECT rowid FROM history ORDER BY rowid DESC LIMIT ?)
            "#,
        )
        .bind(self.max_items as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let result = sqlx::query("DELETE FROM history WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        sqlx::query("DELETE FROM history")
            .execute(&self.pool)
            .await
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.prune_expired().await?;

        let rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT id, text, voice_id, voice_name, audio, format, emotion, duration_secs, timestamp
             FROM history ORDER BY rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        self.prune_expired().await?;

        let row = sqlx::query_as::<_, HistoryRow>(
            "SELECT id, text, voice_id, voice_name, audio, format, emotion, duration_secs, timestamp
             FROM history WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(HistoryEntry::from))
    }
}
