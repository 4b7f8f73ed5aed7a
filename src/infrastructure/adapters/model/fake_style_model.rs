//! Fake Style Model - 用于测试的风格迁移模型
//!
//! 不加载任何权重：把内容图与风格图的平均颜色按比例混合

use async_trait::async_trait;
use ndarray::Axis;

use crate::application::ports::{StyleModelError, StyleModelPort};
use crate::domain::stylization::{ImageTensor, TensorShape};

/// Fake Style Model
pub struct FakeStyleModel {
    /// 风格颜色所占比例，0 返回内容图，1 返回纯色
    style_weight: f32,
}

impl FakeStyleModel {
    pub fn new(style_weight: f32) -> Self {
        Self {
            style_weight: style_weight.clamp(0.0, 1.0),
        }
    }
}

impl Default for FakeStyleModel {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[async_trait]
impl StyleModelPort for FakeStyleModel {
    async fn stylize(
        &self,
        content: ImageTensor,
        style: ImageTensor,
    ) -> Result<ImageTensor, StyleModelError> {
        for tensor in [&content, &style] {
            TensorShape::of(tensor)
                .ensure_single_rgb()
                .map_err(|e| StyleModelError::Inference(e.to_string()))?;
        }

        // 每个通道的平均值，形状 [3]
        let mean = style
            .mean_axis(Axis(0))
            .and_then(|a| a.mean_axis(Axis(0)))
            .and_then(|a| a.mean_axis(Axis(0)))
            .ok_or_else(|| StyleModelError::Inference("empty style image".to_string()))?;

        let w = self.style_weight;
        Ok(content.mapv(|v| v * (1.0 - w)) + mean.mapv(|m| m * w))
    }

    fn name(&self) -> &str {
        "fake"
    }
}
