//! Domain Layer - 领域层
//!
//! Stylization Context: 风格迁移的图像张量与尺寸约束

pub mod stylization;
