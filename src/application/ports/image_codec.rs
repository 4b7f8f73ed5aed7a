//! Image Codec Port - 图像编解码抽象

use thiserror::Error;

use crate::domain::stylization::{ImageTensor, MaxDim};

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Empty image data")]
    EmptyInput,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Invalid tensor: {0}")]
    InvalidTensor(String),
}

/// Image Codec Port
///
/// 预处理与后处理均为 CPU 密集操作，调用方负责放到阻塞线程池执行
pub trait ImageCodecPort: Send + Sync {
    /// 解码图像字节为 `[1, H, W, 3]` 张量
    ///
    /// 转 RGB、按 EXIF 方向校正、等比缩小至长边不超过 `max_dim`、归一化到 `[0, 1]`
    fn decode(&self, data: &[u8], max_dim: MaxDim) -> Result<ImageTensor, CodecError>;

    /// 将 `[1, H, W, 3]` 张量裁剪到 `[0, 1]` 后编码为 PNG
    fn encode_png(&self, tensor: &ImageTensor) -> Result<Vec<u8>, CodecError>;
}
