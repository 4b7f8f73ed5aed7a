//! ONNX Style Model - 基于 ONNX Runtime 的风格迁移模型
//!
//! 实现 StyleModelPort trait，进程内只加载一次。
//!
//! 模型约定（Magenta arbitrary-image-stylization 导出）:
//! - 输入 0: 内容图 `[1, H, W, 3]`，f32，`[0, 1]`
//! - 输入 1: 风格图 `[1, H', W', 3]`，f32，`[0, 1]`
//! - 输出 0: 风格化结果 `[1, H, W, 3]`

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::execution_providers::{CUDAExecutionProvider, ExecutionProviderDispatch};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;

use crate::application::ports::{StyleModelError, StyleModelPort};
use crate::config::{ExecutionProviderKind, ModelConfig};
use crate::domain::stylization::ImageTensor;

/// ONNX 风格迁移模型
///
/// `Session::run` 需要独占访问，推理请求在互斥锁上串行执行
pub struct OnnxStyleModel {
    name: String,
    session: Arc<Mutex<Session>>,
}

impl OnnxStyleModel {
    /// 从文件加载模型
    ///
    /// `path` 由 ModelFetcher 给出，线程数与执行后端取自 `config`
    pub fn load(path: &Path, config: &ModelConfig) -> Result<Self, StyleModelError> {
        let mut builder = Session::builder()
            .map_err(|e| load_error(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(path, e))?
            .with_execution_providers(execution_providers(config.execution_provider))
            .map_err(|e| load_error(path, e))?;

        if config.intra_threads > 0 {
            builder = builder
                .with_intra_threads(config.intra_threads)
                .map_err(|e| load_error(path, e))?;
        }

        let session = builder
            .commit_from_file(path)
            .map_err(|e| load_error(path, e))?;

        if session.inputs.len() < 2 {
            return Err(StyleModelError::Load(format!(
                "{}: expected 2 inputs (content, style), found {}",
                path.display(),
                session.inputs.len()
            )));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("style-model")
            .to_string();

        tracing::info!(
            model = %name,
            path = %path.display(),
            execution_provider = %config.execution_provider,
            inputs = ?session.inputs.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            outputs = ?session.outputs.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
            "Model ready"
        );

        Ok(Self {
            name,
            session: Arc::new(Mutex::new(session)),
        })
    }

    fn run(
        session: &mut Session,
        content: ImageTensor,
        style: ImageTensor,
    ) -> Result<ImageTensor, StyleModelError> {
        let content = Tensor::from_array(content).map_err(inference_error)?;
        let style = Tensor::from_array(style).map_err(inference_error)?;

        let outputs = session
            .run(ort::inputs![content, style])
            .map_err(inference_error)?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| StyleModelError::InvalidOutput("model produced no output".to_string()))?;

        extract_array4(&output)
    }
}

/// 注册失败时 ort 记录警告并回退到 CPU
fn execution_providers(kind: ExecutionProviderKind) -> Vec<ExecutionProviderDispatch> {
    match kind {
        ExecutionProviderKind::Cpu => Vec::new(),
        ExecutionProviderKind::Cuda => vec![CUDAExecutionProvider::default().build()],
    }
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> StyleModelError {
    StyleModelError::Load(format!("{}: {}", path.display(), e))
}

fn inference_error(e: impl std::fmt::Display) -> StyleModelError {
    StyleModelError::Inference(e.to_string())
}

/// 从 ONNX 输出中提取 4 维张量
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn extract_array4(value: &ort::value::ValueRef<'_>) -> Result<ImageTensor, StyleModelError> {
    let (shape, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|e| StyleModelError::InvalidOutput(e.to_string()))?;

    let dims: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
    if dims.len() != 4 {
        return Err(StyleModelError::InvalidOutput(format!(
            "expected 4D tensor, got {}D {:?}",
            dims.len(),
            dims
        )));
    }

    ImageTensor::from_shape_vec((dims[0], dims[1], dims[2], dims[3]), data.to_vec())
        .map_err(|e| StyleModelError::InvalidOutput(format!("reshape to {:?} failed: {}", dims, e)))
}

#[async_trait]
impl StyleModelPort for OnnxStyleModel {
    async fn stylize(
        &self,
        content: ImageTensor,
        style: ImageTensor,
    ) -> Result<ImageTensor, StyleModelError> {
        let session = self.session.clone();

        tokio::task::spawn_blocking(move || {
            let mut session = session.lock().map_err(|_| {
                StyleModelError::Unavailable("model session lock poisoned".to_string())
            })?;
            Self::run(&mut session, content, style)
        })
        .await
        .map_err(|e| StyleModelError::Inference(format!("inference task failed: {}", e)))?
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn health_check(&self) -> bool {
        !self.session.is_poisoned()
    }
}
