//! Health Handler

use axum::extract::State;
use std::sync::Arc;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 健康检查 - 纯文本 `ok`，模型不可用时 503
pub async fn health(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    if state.model.health_check().await {
        Ok("ok")
    } else {
        Err(ApiError::ServiceUnavailable(format!(
            "model '{}' unavailable",
            state.model.name()
        )))
    }
}
