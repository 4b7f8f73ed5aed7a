//! Image Crate Codec
//!
//! 预处理：
//! - 任意受支持格式解码，转 RGB
//! - 按 EXIF Orientation 校正方向
//! - Lanczos3 等比缩小，长边不超过 max_dim
//! - 归一化为 `[1, H, W, 3]` f32 张量
//!
//! 后处理：去 batch 维、裁剪到 `[0, 1]`、乘 255 截断为 u8、编码 PNG

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use ndarray::Axis;

use crate::application::ports::{CodecError, ImageCodecPort};
use crate::domain::stylization::{fit_within, ImageTensor, MaxDim, TensorShape, RGB_CHANNELS};

/// 基于 image crate 的编解码器
#[derive(Debug, Clone, Default)]
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    pub fn new() -> Self {
        Self
    }

    /// 解码并校正方向
    fn decode_oriented(data: &[u8]) -> Result<DynamicImage, CodecError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        if reader.format().is_none() {
            return Err(CodecError::Decode("unrecognized image format".to_string()));
        }

        let mut decoder = reader
            .into_decoder()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        // 无法读取方向信息时按原样处理
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

        let mut img =
            DynamicImage::from_decoder(decoder).map_err(|e| CodecError::Decode(e.to_string()))?;
        img.apply_orientation(orientation);

        Ok(img)
    }
}

/// 将 `[0, 1]` 浮点值转换为像素值（裁剪后截断）
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

impl ImageCodecPort for ImageCrateCodec {
    fn decode(&self, data: &[u8], max_dim: MaxDim) -> Result<ImageTensor, CodecError> {
        if data.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let rgb = Self::decode_oriented(data)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let (target_w, target_h) = fit_within(width, height, max_dim);

        let rgb = if (target_w, target_h) == (width, height) {
            rgb
        } else {
            imageops::resize(&rgb, target_w, target_h, FilterType::Lanczos3)
        };

        let shape = (1, target_h as usize, target_w as usize, RGB_CHANNELS);
        let values: Vec<f32> = rgb
            .into_raw()
            .into_iter()
            .map(|v| f32::from(v) / 255.0)
            .collect();

        ImageTensor::from_shape_vec(shape, values)
            .map_err(|e| CodecError::InvalidTensor(e.to_string()))
    }

    fn encode_png(&self, tensor: &ImageTensor) -> Result<Vec<u8>, CodecError> {
        let shape = TensorShape::of(tensor);
        shape
            .ensure_single_rgb()
            .map_err(|e| CodecError::InvalidTensor(e.to_string()))?;

        let width = u32::try_from(shape.width)
            .map_err(|_| CodecError::InvalidTensor(format!("width too large: {}", shape.width)))?;
        let height = u32::try_from(shape.height)
            .map_err(|_| CodecError::InvalidTensor(format!("height too large: {}", shape.height)))?;

        // iter() 按逻辑顺序遍历，与内存布局无关
        let pixels: Vec<u8> = tensor
            .index_axis(Axis(0), 0)
            .iter()
            .map(|&v| to_pixel(v))
            .collect();

        let img = RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
            CodecError::InvalidTensor(format!("pixel buffer does not match shape {}", shape))
        })?;

        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(buf.into_inner())
    }
}
