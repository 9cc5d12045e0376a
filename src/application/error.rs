//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GatewayError, HistoryError, SettingsError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 凭证缺失或被网关拒绝
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 上游网关错误
    #[error("Gateway error: {0}")]
    GatewayError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建凭证错误
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<GatewayError> for ApplicationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Auth => Self::Unauthorized("API key rejected by gateway".to_string()),
            other => Self::GatewayError(other.to_string()),
        }
    }
}

impl From<HistoryError> for ApplicationError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(id) => Self::not_found("History entry", id),
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<SettingsError> for ApplicationError {
    fn from(err: SettingsError) -> Self {
        Self::StorageError(err.to_string())
    }
}
