use thiserror::Error;

use crate::api_client::ApiError;
use crate::storage::StoreError;

/// Application-level error type shared by the workflow, the presentation
/// layer and the CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Local storage error: {0}")]
    Store(#[from] StoreError),

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Rejections happen before any request is sent.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFile(_) | AppError::FileTooLarge { .. }
        )
    }
}
