//! Stylize Command Handler

use std::sync::Arc;
use std::time::Instant;

use crate::application::commands::{Stylize, StylizeResult};
use crate::application::error::{decode_error, encode_error, ApplicationError};
use crate::application::ports::{ImageCodecPort, StyleModelPort};
use crate::domain::stylization::{MaxDim, TensorShape};

/// 风格迁移尺寸参数
#[derive(Debug, Clone, Copy)]
pub struct StylizeLimits {
    /// 请求未指定时使用的长边上限
    pub default_max_dim: MaxDim,
    /// 请求可指定的最大长边
    pub max_dim_limit: u32,
}

/// Stylize Handler
///
/// 解码 -> 推理 -> 编码，解码与编码在阻塞线程池执行
pub struct StylizeHandler {
    model: Arc<dyn StyleModelPort>,
    codec: Arc<dyn ImageCodecPort>,
    limits: StylizeLimits,
}

impl StylizeHandler {
    pub fn new(
        model: Arc<dyn StyleModelPort>,
        codec: Arc<dyn ImageCodecPort>,
        limits: StylizeLimits,
    ) -> Self {
        Self {
            model,
            codec,
            limits,
        }
    }

    fn resolve_max_dim(&self, raw: Option<&str>) -> Result<MaxDim, ApplicationError> {
        match raw {
            Some(text) => Ok(MaxDim::parse(text, self.limits.max_dim_limit)?),
            None => Ok(self.limits.default_max_dim),
        }
    }

    pub async fn handle(&self, command: Stylize) -> Result<StylizeResult, ApplicationError> {
        let max_dim = self.resolve_max_dim(command.max_dim.as_deref())?;

        let codec = self.codec.clone();
        let (content, style) = tokio::task::spawn_blocking(move || {
            let content = codec
                .decode(&command.content, max_dim)
                .map_err(|e| decode_error("content", e))?;
            let style = codec
                .decode(&command.style, max_dim)
                .map_err(|e| decode_error("style", e))?;
            Ok::<_, ApplicationError>((content, style))
        })
        .await??;

        tracing::debug!(
            model = %self.model.name(),
            max_dim = %max_dim,
            content_shape = %TensorShape::of(&content),
            style_shape = %TensorShape::of(&style),
            "Images decoded"
        );

        let started = Instant::now();
        let stylized = self.model.stylize(content, style).await?;
        let elapsed = started.elapsed();

        let shape = TensorShape::of(&stylized);
        tracing::info!(
            model = %self.model.name(),
            elapsed_secs = %format!("{:.2}", elapsed.as_secs_f64()),
            shape = %shape,
            "Stylize OK"
        );

        let codec = self.codec.clone();
        let png = tokio::task::spawn_blocking(move || codec.encode_png(&stylized))
            .await?
            .map_err(encode_error)?;

        Ok(StylizeResult {
            png,
            width: u32::try_from(shape.width).unwrap_or(u32::MAX),
            height: u32::try_from(shape.height).unwrap_or(u32::MAX),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StyleModelError;
    use crate::domain::stylization::ImageTensor;
    use crate::infrastructure::adapters::ImageCrateCodec;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// 记录输入形状并原样返回内容图
    #[derive(Default)]
    struct RecordingModel {
        seen: Mutex<Vec<(TensorShape, TensorShape)>>,
        fail: bool,
    }

    #[async_trait]
    impl StyleModelPort for RecordingModel {
        async fn stylize(
            &self,
            content: ImageTensor,
            style: ImageTensor,
        ) -> Result<ImageTensor, StyleModelError> {
            if self.fail {
                return Err(StyleModelError::Inference("boom".to_string()));
            }
            self.seen
                .lock()
                .unwrap()
                .push((TensorShape::of(&content), TensorShape::of(&style)));
            Ok(content)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([10, 20, 30]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn handler(model: Arc<RecordingModel>) -> StylizeHandler {
        StylizeHandler::new(
            model,
            Arc::new(ImageCrateCodec::new()),
            StylizeLimits {
                default_max_dim: MaxDim::new(64, 1024).unwrap(),
                max_dim_limit: 1024,
            },
        )
    }

    #[tokio::test]
    async fn test_uses_default_max_dim() {
        let model = Arc::new(RecordingModel::default());
        let result = handler(model.clone())
            .handle(Stylize {
                content: png_bytes(200, 100),
                style: png_bytes(40, 80),
                max_dim: None,
            })
            .await
            .unwrap();

        assert_eq!((result.width, result.height), (64, 32));
        assert!(result.png.starts_with(&[0x89, b'P', b'N', b'G']));

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].0.to_string(), "[1, 32, 64, 3]");
        assert_eq!(seen[0].1.to_string(), "[1, 64, 32, 3]");
    }

    #[tokio::test]
    async fn test_explicit_max_dim() {
        let model = Arc::new(RecordingModel::default());
        let result = handler(model)
            .handle(Stylize {
                content: png_bytes(200, 100),
                style: png_bytes(40, 80),
                max_dim: Some("100".to_string()),
            })
            .await
            .unwrap();

        assert_eq!((result.width, result.height), (100, 50));
    }

    #[tokio::test]
    async fn test_invalid_max_dim_is_validation_error() {
        let model = Arc::new(RecordingModel::default());
        let err = handler(model)
            .handle(Stylize {
                content: png_bytes(8, 8),
                style: png_bytes(8, 8),
                max_dim: Some("big".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_undecodable_style_is_validation_error() {
        let model = Arc::new(RecordingModel::default());
        let err = handler(model.clone())
            .handle(Stylize {
                content: png_bytes(8, 8),
                style: b"not an image".to_vec(),
                max_dim: None,
            })
            .await
            .unwrap_err();

        match err {
            ApplicationError::ValidationError(msg) => assert!(msg.starts_with("style image")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_inference_error() {
        let model = Arc::new(RecordingModel {
            fail: true,
            ..Default::default()
        });
        let err = handler(model)
            .handle(Stylize {
                content: png_bytes(8, 8),
                style: png_bytes(8, 8),
                max_dim: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InferenceError(_)));
    }
}
