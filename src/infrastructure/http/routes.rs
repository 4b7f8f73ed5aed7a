//! HTTP Routes
//!
//! API Endpoints:
//! - /          GET   服务说明
//! - /health    GET   健康检查
//! - /stylize   POST  上传内容图与风格图，返回 PNG

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/stylize", post(handlers::stylize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{StyleModelError, StyleModelPort, StylizeLimits};
    use crate::domain::stylization::{ImageTensor, MaxDim};
    use crate::infrastructure::adapters::{FakeStyleModel, ImageCrateCodec};
    use crate::infrastructure::http::server::build_router;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
    use async_trait::async_trait;
    use std::io::Cursor;
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "stylize-test-boundary";

    /// 健康检查失败的模型
    struct BrokenModel;

    #[async_trait]
    impl StyleModelPort for BrokenModel {
        async fn stylize(
            &self,
            _content: ImageTensor,
            _style: ImageTensor,
        ) -> Result<ImageTensor, StyleModelError> {
            Err(StyleModelError::Unavailable("broken".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }

        async fn health_check(&self) -> bool {
            false
        }
    }

    fn router_with_model(model: Arc<dyn StyleModelPort>, max_body_bytes: usize) -> Router {
        let state = AppState::new(
            model,
            Arc::new(ImageCrateCodec::new()),
            StylizeLimits {
                default_max_dim: MaxDim::new(32, 256).unwrap(),
                max_dim_limit: 256,
            },
        );
        build_router(Arc::new(state), max_body_bytes)
    }

    fn test_router(max_body_bytes: usize) -> Router {
        router_with_model(Arc::new(FakeStyleModel::default()), max_body_bytes)
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 100, 50]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    enum Part<'a> {
        File(&'a str, Vec<u8>),
        Text(&'a str, &'a str),
    }

    fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File(name, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{0}\"; filename=\"{0}.png\"\r\n\
                             Content-Type: image/png\r\n\r\n",
                            name
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&data);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn post_stylize(router: Router, parts: Vec<Part<'_>>) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri("/stylize")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_index() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_router(1024).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "ok": true, "msg": "Style Transfer API. POST /stylize" })
        );
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_router(1024).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_health_unavailable_model() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router_with_model(Arc::new(BrokenModel), 1024)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "model 'broken' unavailable" })
        );
    }

    #[tokio::test]
    async fn test_stylize_returns_png() {
        let response = post_stylize(
            test_router(1024 * 1024),
            vec![
                Part::File("content", png(64, 48)),
                Part::File("style", png(10, 10)),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"stylized.png\""
        );
        assert!(headers.get(header::ETAG).is_none());
        assert!(headers.get(header::LAST_MODIFIED).is_none());
        assert!(headers.contains_key("x-stylize-elapsed-ms"));

        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let img = image::load_from_memory_with_format(&body, ImageFormat::Png).unwrap();
        // 默认 max_dim = 32
        assert_eq!(img.dimensions(), (32, 24));
    }

    #[tokio::test]
    async fn test_stylize_respects_max_dim_field() {
        let response = post_stylize(
            test_router(1024 * 1024),
            vec![
                Part::Text("max_dim", "16"),
                Part::File("content", png(64, 48)),
                Part::File("style", png(10, 10)),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let img = image::load_from_memory(&body).unwrap();
        assert_eq!(img.dimensions(), (16, 12));
    }

    #[tokio::test]
    async fn test_stylize_missing_style_is_bad_request() {
        let response = post_stylize(
            test_router(1024 * 1024),
            vec![Part::File("content", png(8, 8))],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "fields 'content' and 'style' are required" })
        );
    }

    #[tokio::test]
    async fn test_stylize_invalid_max_dim_is_bad_request() {
        let response = post_stylize(
            test_router(1024 * 1024),
            vec![
                Part::File("content", png(8, 8)),
                Part::File("style", png(8, 8)),
                Part::Text("max_dim", "huge"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("max_dim"));
    }

    #[tokio::test]
    async fn test_stylize_undecodable_image_is_bad_request() {
        let response = post_stylize(
            test_router(1024 * 1024),
            vec![
                Part::File("content", b"garbage".to_vec()),
                Part::File("style", png(8, 8)),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("content image"));
    }

    #[tokio::test]
    async fn test_stylize_body_over_limit_is_rejected() {
        let response = post_stylize(
            test_router(64),
            vec![
                Part::File("content", png(64, 64)),
                Part::File("style", png(64, 64)),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_stylize_allows_cors() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/stylize")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = test_router(1024).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
