//! Style Model Port - 风格迁移模型抽象
//!
//! 定义风格迁移推理的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::stylization::ImageTensor;

/// 模型错误
#[derive(Debug, Error)]
pub enum StyleModelError {
    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),

    #[error("Model unavailable: {0}")]
    Unavailable(String),
}

/// Style Model Port
///
/// 进程内唯一的预训练模型实例
#[async_trait]
pub trait StyleModelPort: Send + Sync {
    /// 执行一次风格迁移
    ///
    /// `content` 与 `style` 均为 `[1, H, W, 3]`，返回同布局的结果张量
    async fn stylize(
        &self,
        content: ImageTensor,
        style: ImageTensor,
    ) -> Result<ImageTensor, StyleModelError>;

    /// 模型名称（用于日志）
    fn name(&self) -> &str;

    /// 检查模型是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
