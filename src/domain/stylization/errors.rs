//! Stylization Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StylizationError {
    #[error("invalid max_dim: {0}")]
    InvalidMaxDim(String),

    #[error("invalid image tensor: {0}")]
    InvalidTensor(String),
}
