//! Style Model Adapter - 风格迁移模型实现

mod fake_style_model;
mod model_fetcher;
mod onnx_style_model;

pub use fake_style_model::FakeStyleModel;
pub use model_fetcher::ModelFetcher;
pub use onnx_style_model::OnnxStyleModel;
