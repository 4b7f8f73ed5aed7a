//! Stylize - 神经风格迁移 HTTP 服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Stylization Context: 图像张量约定、尺寸约束
//!
//! 应用层 (application/):
//! - Ports: StyleModelPort, ImageCodecPort
//! - Commands: Stylize 命令及处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API (axum)
//! - Adapters: ONNX 模型、模型下载、image crate 编解码

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
