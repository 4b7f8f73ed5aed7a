//! Stylization Context - Value Objects

use ndarray::Array4;

use super::StylizationError;

/// RGB 通道数
pub const RGB_CHANNELS: usize = 3;

/// 图像张量，NHWC 布局 `[1, H, W, 3]`，取值范围 `[0, 1]`
pub type ImageTensor = Array4<f32>;

/// 张量形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorShape {
    pub batch: usize,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl TensorShape {
    pub fn of(tensor: &ImageTensor) -> Self {
        let (batch, height, width, channels) = tensor.dim();
        Self {
            batch,
            height,
            width,
            channels,
        }
    }

    /// 校验为单张 RGB 图像
    pub fn ensure_single_rgb(&self) -> Result<(), StylizationError> {
        if self.batch != 1 {
            return Err(StylizationError::InvalidTensor(format!(
                "expected batch size 1, got shape {}",
                self
            )));
        }
        if self.channels != RGB_CHANNELS {
            return Err(StylizationError::InvalidTensor(format!(
                "expected {} channels, got shape {}",
                RGB_CHANNELS, self
            )));
        }
        if self.height == 0 || self.width == 0 {
            return Err(StylizationError::InvalidTensor(format!(
                "empty image, got shape {}",
                self
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for TensorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.batch, self.height, self.width, self.channels
        )
    }
}

/// 图像长边上限
///
/// 不变量:
/// - 0 < value <= limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDim(u32);

impl MaxDim {
    pub fn new(value: u32, limit: u32) -> Result<Self, StylizationError> {
        if value == 0 {
            return Err(StylizationError::InvalidMaxDim(
                "max_dim must be greater than 0".to_string(),
            ));
        }
        if value > limit {
            return Err(StylizationError::InvalidMaxDim(format!(
                "max_dim must not exceed {}, got {}",
                limit, value
            )));
        }
        Ok(Self(value))
    }

    /// 从表单文本解析
    pub fn parse(text: &str, limit: u32) -> Result<Self, StylizationError> {
        let trimmed = text.trim();
        let value = trimmed.parse::<u32>().map_err(|_| {
            StylizationError::InvalidMaxDim(format!(
                "max_dim must be a positive integer, got '{}'",
                trimmed
            ))
        })?;
        Self::new(value, limit)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MaxDim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 等比缩放，使长边不超过 `max_dim`
///
/// 已经满足约束的图像原样返回（只缩小不放大），每条边至少为 1。
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(width: u32, height: u32, max_dim: MaxDim) -> (u32, u32) {
    let max_dim = max_dim.get();
    let longest = width.max(height);
    if longest <= max_dim {
        return (width, height);
    }

    let scale = f64::from(max_dim) / f64::from(longest);
    let scaled = |side: u32| -> u32 {
        if side == longest {
            max_dim
        } else {
            ((f64::from(side) * scale).round() as u32).clamp(1, max_dim)
        }
    };

    (scaled(width), scaled(height))
}
