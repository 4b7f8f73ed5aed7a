//! Stylize - 神经风格迁移 HTTP 服务
//!
//! 启动流程：加载配置 -> 初始化日志 -> 获取并加载模型 -> 启动 HTTP 服务

use std::sync::Arc;

use stylize::application::StylizeLimits;
use stylize::config::{load_config, print_config, LogConfig};
use stylize::domain::stylization::MaxDim;
use stylize::infrastructure::{AppState, HttpServer, ImageCrateCodec, ModelFetcher, OnnxStyleModel};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},stylize={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Stylize - Style Transfer API");
    print_config(&config);

    // 获取模型文件（必要时下载）
    let model_path = ModelFetcher::new(&config.model)?.ensure().await?;

    // 加载模型（进程内唯一实例）
    tracing::info!(path = %model_path.display(), "Loading style model...");
    let model_config = config.model.clone();
    let model = tokio::task::spawn_blocking(move || OnnxStyleModel::load(&model_path, &model_config))
        .await??;

    let limits = StylizeLimits {
        default_max_dim: MaxDim::new(config.image.default_max_dim, config.image.max_dim_limit)?,
        max_dim_limit: config.image.max_dim_limit,
    };

    let state = AppState::new(Arc::new(model), Arc::new(ImageCrateCodec::new()), limits);
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
