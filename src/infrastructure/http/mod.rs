//! HTTP Layer - RESTful API
//!
//! - GET  /         服务说明
//! - GET  /health   健康检查
//! - POST /stylize  风格迁移（multipart）

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
