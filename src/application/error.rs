//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{CodecError, StyleModelError};
use crate::domain::stylization::StylizationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误（客户端输入不合法）
    #[error("{0}")]
    ValidationError(String),

    /// 模型推理错误
    #[error("{0}")]
    InferenceError(String),

    /// 内部错误
    #[error("{0}")]
    InternalError(String),
}

impl From<StylizationError> for ApplicationError {
    fn from(err: StylizationError) -> Self {
        match err {
            StylizationError::InvalidMaxDim(_) => Self::ValidationError(err.to_string()),
            StylizationError::InvalidTensor(_) => Self::InternalError(err.to_string()),
        }
    }
}

impl From<StyleModelError> for ApplicationError {
    fn from(err: StyleModelError) -> Self {
        Self::InferenceError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApplicationError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::InternalError(format!("Blocking task failed: {}", err))
    }
}

/// 解码错误属于客户端输入问题，编码错误属于内部问题
pub(crate) fn decode_error(field: &str, err: CodecError) -> ApplicationError {
    ApplicationError::ValidationError(format!("{} image: {}", field, err))
}

pub(crate) fn encode_error(err: CodecError) -> ApplicationError {
    ApplicationError::InternalError(err.to_string())
}
