//! VoiceForge - TTS 工作台服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录、过滤与维度派生
//! - Prosody: 韵律控制参数与更新动作
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsGateway, HistoryStore, PreviewCache, SettingsStore）
//! - Commands: CQRS 命令处理器（生成、试听、历史与设置维护）
//! - Queries: CQRS 查询处理器（目录、历史、设置、情感状态）
//! - 进程内组件: 目录快照、控制面板、播放独占槽、防抖情感分析器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 试听缓存内存实现
//! - Persistence: SQLite 存储（历史、设置、收藏）
//! - Adapters: 上游 TTS 网关客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
