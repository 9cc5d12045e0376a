//! In-Memory Components - 进程内组件

mod preview_cache;

pub use preview_cache::DashPreviewCache;
