//! SQLite Settings Store - 本地设置仓储
//!
//! 键值表存 API 凭证和选中音色，收藏集合单独一张表

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use super::database::DbPool;
use crate::application::ports::{SettingsError, SettingsStorePort};

/// 固定的设置键
const KEY_API_KEY: &str = "api_key";
const KEY_SELECTED_VOICE: &str = "selected_voice";

/// SQLite 设置仓储
pub struct SqliteSettingsStore {
    pool: DbPool,
}

impl SqliteSettingsStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn get_value(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> Result<(), SettingsError> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStorePort for SqliteSettingsStore {
    async fn api_key(&self) -> Result<Option<String>, SettingsError> {
        self.get_value(KEY_API_KEY).await
    }

    async fn set_api_key(&self, key: &str) -> Result<(), SettingsError> {
        self.set_value(KEY_API_KEY, key).await
    }

    async fn clear_api_key(&self) -> Result<(), SettingsError> {
        self.delete_value(KEY_API_KEY).await
    }

    async fn selected_voice(&self) -> Result<Option<String>, SettingsError> {
        self.get_value(KEY_SELECTED_VOICE).await
    }

    async fn set_selected_voice(&self, voice_id: &str) -> Result<(), SettingsError> {
        self.set_value(KEY_SELECTED_VOICE, voice_id).await
    }

    async fn saved_voices(&self) -> Result<Vec<String>, SettingsError> {
        let rows = sqlx::query("SELECT voice_id FROM saved_voices ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.get("voice_id")).collect())
    }

    async fn toggle_saved_voice(&self, voice_id: &str) -> Result<bool, SettingsError> {
        let removed = sqlx::query("DELETE FROM saved_voices WHERE voice_id = ?")
            .bind(voice_id)
            .execute(&self.pool)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query("INSERT INTO saved_voices (voice_id, created_at) VALUES (?, ?)")
            .bind(voice_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::database::{
        create_pool, run_migrations, DatabaseConfig,
    };

    async fn store() -> SqliteSettingsStore {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteSettingsStore::new(pool)
    }

    #[tokio::test]
    async fn test_api_key_round_trip() {
        let store = store().await;
        assert_eq!(store.api_key().await.unwrap(), None);

        store.set_api_key("tc-key").await.unwrap();
        assert_eq!(store.api_key().await.unwrap().as_deref(), Some("tc-key"));

        store.set_api_key("tc-key-2").await.unwrap();
        assert_eq!(store.api_key().await.unwrap().as_deref(), Some("tc-key-2"));

        store.clear_api_key().await.unwrap();
        assert_eq!(store.api_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_selected_voice_round_trip() {
        let store = store().await;
        store.set_selected_voice("v1").await.unwrap();
        store.set_selected_voice("v2").await.unwrap();
        assert_eq!(store.selected_voice().await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("settings.db"));

        {
            let pool = create_pool(&config).await.unwrap();
            run_migrations(&pool).await.unwrap();
            let store = SqliteSettingsStore::new(pool.clone());
            store.set_api_key("persisted-key").await.unwrap();
            store.set_selected_voice("v1").await.unwrap();
            store.toggle_saved_voice("v2").await.unwrap();
            pool.close().await;
        }

        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let store = SqliteSettingsStore::new(pool);

        assert_eq!(store.api_key().await.unwrap().as_deref(), Some("persisted-key"));
        assert_eq!(store.selected_voice().await.unwrap().as_deref(), Some("v1"));
        assert_eq!(store.saved_voices().await.unwrap(), vec!["v2"]);
    }

    #[tokio::test]
    async fn test_toggle_saved_voice_flips_membership() {
        let store = store().await;

        assert!(store.toggle_saved_voice("v1").await.unwrap());
        assert!(store.toggle_saved_voice("v2").await.unwrap());
        assert_eq!(store.saved_voices().await.unwrap(), vec!["v1", "v2"]);

        assert!(!store.toggle_saved_voice("v1").await.unwrap());
        assert_eq!(store.saved_voices().await.unwrap(), vec!["v2"]);
    }
}
