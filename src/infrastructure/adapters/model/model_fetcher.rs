//! Model Fetcher - 确保模型文件在本地可用
//!
//! 已存在则直接使用；否则按配置的 URL 下载到 `model.path`。
//! 下载先写入 `.part` 临时文件，完成后原子重命名。

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::application::ports::StyleModelError;
use crate::config::ModelConfig;

/// 模型文件获取器
pub struct ModelFetcher {
    client: Client,
    path: PathBuf,
    url: Option<String>,
}

impl ModelFetcher {
    pub fn new(config: &ModelConfig) -> Result<Self, StyleModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| StyleModelError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            path: config.path.clone(),
            url: config.url.clone(),
        })
    }

    /// 返回本地模型路径，必要时先下载
    pub async fn ensure(&self) -> Result<PathBuf, StyleModelError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            tracing::debug!(path = %self.path.display(), "Model file present");
            return Ok(self.path.clone());
        }

        let url = self.url.as_deref().ok_or_else(|| {
            StyleModelError::Unavailable(format!(
                "model file {} not found and no model.url configured",
                self.path.display()
            ))
        })?;

        self.download(url).await?;
        Ok(self.path.clone())
    }

    fn part_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }

    async fn download(&self, url: &str) -> Result<(), StyleModelError> {
        tracing::info!(url = %url, path = %self.path.display(), "Downloading model");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StyleModelError::Unavailable(format!("Cannot fetch model: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StyleModelError::Unavailable(format!(
                "Model download failed: HTTP {}",
                status
            )));
        }

        let part = self.part_path();
        let result = write_stream(response, &part).await;

        match result {
            Ok(written) => {
                tokio::fs::rename(&part, &self.path)
                    .await
                    .map_err(|e| io_error(&self.path, e))?;
                tracing::info!(
                    path = %self.path.display(),
                    bytes = written,
                    "Model downloaded"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    tracing::warn!("Failed to remove partial model file: {}", cleanup);
                }
                Err(e)
            }
        }
    }
}

async fn write_stream(response: reqwest::Response, part: &Path) -> Result<u64, StyleModelError> {
    let mut file = tokio::fs::File::create(part)
        .await
        .map_err(|e| io_error(part, e))?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| StyleModelError::Unavailable(format!("Model download interrupted: {}", e)))?;
        file.write_all(&chunk).await.map_err(|e| io_error(part, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| io_error(part, e))?;
    Ok(written)
}

fn io_error(path: &Path, e: std::io::Error) -> StyleModelError {
    StyleModelError::Unavailable(format!("{}: {}", path.display(), e))
}
