//! Stylize HTTP Handler

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use http::header::{self, HeaderName};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::Stylize;
use crate::infrastructure::http::dto::{fields, STYLIZED_FILENAME};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 推理耗时响应头
pub const ELAPSED_HEADER: HeaderName = HeaderName::from_static("x-stylize-elapsed-ms");

/// 风格迁移
///
/// Multipart form-data:
/// - content: 内容图（必填）
/// - style:   风格图（必填）
/// - max_dim: 长边上限（可选，默认取配置）
pub async fn stylize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();

    let mut content: Option<Vec<u8>> = None;
    let mut style: Option<Vec<u8>> = None;
    let mut max_dim: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            fields::CONTENT => content = Some(field.bytes().await?.to_vec()),
            fields::STYLE => style = Some(field.bytes().await?.to_vec()),
            fields::MAX_DIM => max_dim = Some(field.text().await?),
            _ => {}
        }
    }

    let (Some(content), Some(style)) = (content, style) else {
        return Err(ApiError::BadRequest(
            "fields 'content' and 'style' are required".to_string(),
        ));
    };

    tracing::debug!(
        request_id = %request_id,
        content_bytes = content.len(),
        style_bytes = style.len(),
        max_dim = ?max_dim,
        "Stylize request received"
    );

    let result = state
        .stylize_handler
        .handle(Stylize {
            content,
            style,
            max_dim,
        })
        .await
        .map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Stylize failed");
            ApiError::from(e)
        })?;

    tracing::info!(
        request_id = %request_id,
        width = result.width,
        height = result.height,
        elapsed_ms = result.elapsed_ms,
        png_bytes = result.png.len(),
        "Stylized image returned"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", STYLIZED_FILENAME),
            ),
            (ELAPSED_HEADER, result.elapsed_ms.to_string()),
        ],
        result.png,
    )
        .into_response())
}
