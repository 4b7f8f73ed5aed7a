//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod image_codec;
mod style_model;

pub use image_codec::{CodecError, ImageCodecPort};
pub use style_model::{StyleModelError, StyleModelPort};
