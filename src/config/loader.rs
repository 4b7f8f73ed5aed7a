//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STYLIZE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STYLIZE_SERVER__PORT=8080`
/// - `STYLIZE_MODEL__PATH=/models/stylize.onnx`
/// - `STYLIZE_MODEL__URL=https://example.com/stylize.onnx`
/// - `STYLIZE_MODEL__EXECUTION_PROVIDER=cuda`
/// - `STYLIZE_IMAGE__DEFAULT_MAX_DIM=384`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.max_body_bytes", 50 * 1024 * 1024)?
        .set_default(
            "model.path",
            "data/models/arbitrary-image-stylization-v1-256.onnx",
        )?
        .set_default("model.download_timeout_secs", 600)?
        .set_default("model.intra_threads", 0)?
        .set_default("model.execution_provider", "cpu")?
        .set_default("image.default_max_dim", 512)?
        .set_default("image.max_dim_limit", 2048)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: STYLIZE_MODEL__PATH=/models/stylize.onnx
    builder = builder.add_source(
        Environment::with_prefix("STYLIZE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Request body limit cannot be 0".to_string(),
        ));
    }

    if config.model.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model path cannot be empty".to_string(),
        ));
    }

    let image = &config.image;
    if image.default_max_dim == 0 || image.default_max_dim > image.max_dim_limit {
        return Err(ConfigError::ValidationError(format!(
            "Default max_dim must be between 1 and {}, got {}",
            image.max_dim_limit, image.default_max_dim
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("Model Path: {}", config.model.path.display());
    if let Some(url) = &config.model.url {
        tracing::info!("Model URL: {}", url);
    }
    tracing::info!("Model Intra Threads: {}", config.model.intra_threads);
    tracing::info!("Execution Provider: {}", config.model.execution_provider);
    tracing::info!(
        "Max Dim: default {}, limit {}",
        config.image.default_max_dim,
        config.image.max_dim_limit
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
