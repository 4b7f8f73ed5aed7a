//! Index Handler

use axum::Json;

use crate::infrastructure::http::dto::IndexResponse;

/// 服务说明
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        ok: true,
        msg: "Style Transfer API. POST /stylize",
    })
}
