//! Application State

use std::sync::Arc;

use crate::application::{ImageCodecPort, StyleModelPort, StylizeHandler, StylizeLimits};

/// 应用状态
///
/// 模型在进程启动时加载一次，所有请求共享
pub struct AppState {
    // ========== Ports ==========
    pub model: Arc<dyn StyleModelPort>,

    // ========== Command Handlers ==========
    pub stylize_handler: StylizeHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        model: Arc<dyn StyleModelPort>,
        codec: Arc<dyn ImageCodecPort>,
        limits: StylizeLimits,
    ) -> Self {
        Self {
            model: model.clone(),
            stylize_handler: StylizeHandler::new(model, codec, limits),
        }
    }
}
