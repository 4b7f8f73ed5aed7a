//! Stylization Context - 风格迁移限界上下文
//!
//! 职责:
//! - 图像张量约定（NHWC, [0, 1]）
//! - 长边尺寸约束与等比缩放计算

mod errors;
mod value_objects;

pub use errors::StylizationError;
pub use value_objects::{fit_within, ImageTensor, MaxDim, TensorShape, RGB_CHANNELS};
