//! Image Codec Adapter - 基于 image crate 的编解码实现

mod image_codec;

pub use image_codec::ImageCrateCodec;
