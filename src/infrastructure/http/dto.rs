//! Data Transfer Objects

use serde::Serialize;

/// 错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 根路径响应
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub ok: bool,
    pub msg: &'static str,
}

/// 风格迁移表单字段
pub mod fields {
    pub const CONTENT: &str = "content";
    pub const STYLE: &str = "style";
    pub const MAX_DIM: &str = "max_dim";
}

/// 结果图文件名
pub const STYLIZED_FILENAME: &str = "stylized.png";
