//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StyleModel、ImageCodec）
//! - commands: 风格迁移命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{StylizeHandler, StylizeLimits},
    Stylize, StylizeResult,
};

pub use error::ApplicationError;

pub use ports::{CodecError, ImageCodecPort, StyleModelError, StyleModelPort};
