//! VoiceForge - TTS 工作台服务
//!
//! - Domain: voice/, prosody (音色目录与韵律控制)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;
use std::time::Duration;

use voiceforge::application::ports::TtsGatewayPort;
use voiceforge::application::EmotionAnalyzer;
use voiceforge::config::{load_config, print_config};
use voiceforge::infrastructure::adapters::gateway::{
    FakeGatewayClient, HttpGatewayClient, HttpGatewayConfig,
};
use voiceforge::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voiceforge::infrastructure::memory::DashPreviewCache;
use voiceforge::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteHistoryStore, SqliteSettingsStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voiceforge={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("VoiceForge - TTS 工作台服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建存储适配器
    let history = Arc::new(SqliteHistoryStore::with_limits(
        pool.clone(),
        config.history.max_items,
        config.history.retention_days,
    ));
    let settings = Arc::new(SqliteSettingsStore::new(pool.clone()));

    // 创建上游网关客户端
    let gateway: Arc<dyn TtsGatewayPort> = if config.upstream.use_fake {
        tracing::warn!("Using offline fake gateway, no upstream calls will be made");
        Arc::new(FakeGatewayClient::new())
    } else {
        let gateway_config = HttpGatewayConfig::new(config.upstream.base_url.clone())
            .with_timeout(config.upstream.timeout_secs);
        Arc::new(HttpGatewayClient::new(gateway_config).map_err(|e| anyhow::anyhow!("{}", e))?)
    };

    // 试听缓存与防抖情感分析器
    let preview_cache = Arc::new(DashPreviewCache::new());
    let analyzer = Arc::new(EmotionAnalyzer::new(
        gateway.clone(),
        Duration::from_millis(config.emotion.debounce_ms),
    ));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(gateway, settings, history, preview_cache, analyzer);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::error!("Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
