//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 上游网关配置
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 历史配置
    #[serde(default)]
    pub history: HistoryConfig,

    /// 情感分析配置
    #[serde(default)]
    pub emotion: EmotionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5210
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 上游网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// 上游 API 基础 URL
    #[serde(default = "default_upstream_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,

    /// 使用离线假网关（开发/演示用，不访问网络）
    #[serde(default)]
    pub use_fake: bool,
}

fn default_upstream_url() -> String {
    "https://api.typecast.ai/v1".to_string()
}

fn default_upstream_timeout() -> u64 {
    60
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            timeout_secs: default_upstream_timeout(),
            use_fake: false,
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/voiceforge.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 历史配置
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// 容量上限
    #[serde(default = "default_history_max_items")]
    pub max_items: usize,

    /// 保留天数
    #[serde(default = "default_history_retention_days")]
    pub retention_days: i64,
}

fn default_history_max_items() -> usize {
    20
}

fn default_history_retention_days() -> i64 {
    7
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: default_history_max_items(),
            retention_days: default_history_retention_days(),
        }
    }
}

/// 情感分析配置
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionConfig {
    /// 防抖窗口（毫秒）
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
