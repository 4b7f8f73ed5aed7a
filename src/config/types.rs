//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 图像预处理配置
    #[serde(default)]
    pub image: ImageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节），上传的两张图片共享此限制
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 风格迁移模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// ONNX 模型文件路径
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// 模型下载地址；当 `path` 不存在时用于首次下载
    #[serde(default)]
    pub url: Option<String>,

    /// 下载超时时间（秒）
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// ONNX Runtime 算子内线程数，0 表示使用运行时默认值
    #[serde(default)]
    pub intra_threads: usize,

    /// 推理设备，不可用时回退到 CPU
    #[serde(default)]
    pub execution_provider: ExecutionProviderKind,
}

/// ONNX Runtime 执行后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionProviderKind {
    #[default]
    Cpu,
    Cuda,
}

impl std::fmt::Display for ExecutionProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("data/models/arbitrary-image-stylization-v1-256.onnx")
}

fn default_download_timeout() -> u64 {
    600
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            url: None,
            download_timeout_secs: default_download_timeout(),
            intra_threads: 0,
            execution_provider: ExecutionProviderKind::Cpu,
        }
    }
}

/// 图像预处理配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// 请求未指定 max_dim 时使用的长边上限
    #[serde(default = "default_max_dim")]
    pub default_max_dim: u32,

    /// 客户端可请求的 max_dim 最大值
    #[serde(default = "default_max_dim_limit")]
    pub max_dim_limit: u32,
}

fn default_max_dim() -> u32 {
    512
}

fn default_max_dim_limit() -> u32 {
    2048
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_max_dim: default_max_dim(),
            max_dim_limit: default_max_dim_limit(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
