//! SQLite Persistence - 数据库与仓储实现

pub mod database;
mod history_repo;
mod settings_repo;

pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use history_repo::SqliteHistoryStore;
pub use settings_repo::SqliteSettingsStore;
