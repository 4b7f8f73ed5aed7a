//! 应用层 - 命令
//!
//! 风格迁移只有一个写路径：上传两张图，返回一张图

mod stylize_commands;

pub mod handlers;

pub use stylize_commands::*;
