//! Infrastructure 层 - 端口的具体实现与 HTTP 表面

pub mod adapters;
pub mod http;
pub mod memory;
pub mod persistence;
