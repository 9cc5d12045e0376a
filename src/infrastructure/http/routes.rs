//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查
//! - /api/voice/refresh            POST  从上游拉取并替换音色目录
//! - /api/voice/list               GET   列出目录
//! - /api/voice/filter             POST  按过滤条件列出目录
//! - /api/voice/facets             GET   过滤维度取值
//! - /api/voice/select             POST  选中音色
//! - /api/voice/bookmark           POST  切换音色收藏
//! - /api/voice/preview            POST  试听（toggle 语义）
//! - /api/voice/preview/stop       POST  停止播放
//! - /api/generate                 POST  生成语音
//! - /api/emotion/analyze          POST  提交文本做防抖情感分析
//! - /api/emotion/latest           GET   最近一次分析结果
//! - /api/emotion/smart            POST  开关智能情感模式
//! - /api/history/list             GET   列出历史（读取时裁剪过期）
//! - /api/history/play             POST  回放历史条目（toggle 语义）
//! - /api/history/delete           POST  删除单条历史
//! - /api/history/clear            POST  清空历史
//! - /api/settings                 GET   当前设置快照
//! - /api/settings/api_key         POST  保存 API 凭证
//! - /api/settings/api_key/clear   POST  清除 API 凭证
//! - /api/controls/update          POST  更新控制面板

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voice", voice_routes())
        .route("/generate", post(handlers::generate_speech))
        .nest("/emotion", emotion_routes())
        .nest("/history", history_routes())
        .nest("/settings", settings_routes())
        .route("/controls/update", post(handlers::update_controls))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/refresh", post(handlers::refresh_voices))
        .route("/list", get(handlers::list_voices))
        .route("/filter", post(handlers::filter_voices))
        .route("/facets", get(handlers::get_facets))
        .route("/select", post(handlers::select_voice))
        .route("/bookmark", post(handlers::bookmark_voice))
        .route("/preview", post(handlers::preview_voice))
        .route("/preview/stop", post(handlers::stop_playback))
}

/// Emotion 路由
fn emotion_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(handlers::analyze_emotion))
        .route("/latest", get(handlers::latest_emotion))
        .route("/smart", post(handlers::set_smart_emotion))
}

/// History 路由
fn history_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_history))
        .route("/play", post(handlers::play_history_item))
        .route("/delete", post(handlers::delete_history_item))
        .route("/clear", post(handlers::clear_history))
}

/// Settings 路由
fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_settings))
        .route("/api_key", post(handlers::set_api_key))
        .route("/api_key/clear", post(handlers::clear_api_key))
}
