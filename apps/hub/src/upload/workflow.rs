use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{AnalysisResult, FileSummary, UploadedFile};
use crate::storage::AnalysisCache;
use crate::upload::analyzer::ResumeAnalyzer;
use crate::upload::file_kind;

/// Exactly one of these is live per workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UploadState {
    Idle,
    Uploading,
    Succeeded { file: FileSummary },
    Failed { message: String },
}

impl UploadState {
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }
}

/// Where a file came from. Both paths go through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Drop,
    Picker,
}

/// Drives one résumé at a time through the analyzer and caches the result.
pub struct UploadWorkflow {
    analyzer: Arc<dyn ResumeAnalyzer>,
    cache: AnalysisCache,
    state: watch::Sender<UploadState>,
}

impl UploadWorkflow {
    pub fn new(analyzer: Arc<dyn ResumeAnalyzer>, cache: AnalysisCache) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            analyzer,
            cache,
            state,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Validates `file`, then runs a single upload.
    ///
    /// A rejected file leaves the state untouched and sends nothing. While an
    /// upload is in flight every further submission fails with
    /// `UploadInProgress`.
    pub async fn submit(
        &self,
        file: UploadedFile,
        source: InputSource,
    ) -> Result<AnalysisResult, AppError> {
        if self.state.borrow().is_busy() {
            return Err(AppError::UploadInProgress);
        }

        let kind = file_kind::validate(&file).map_err(|e| {
            warn!("Ignoring {:?} file {}: {e}", source, file.name);
            e
        })?;

        let started = self.state.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            *state = UploadState::Uploading;
            true
        });
        if !started {
            return Err(AppError::UploadInProgress);
        }

        info!(
            "Analyzing {} ({}, {} bytes) via {}",
            file.name,
            kind.label(),
            file.size(),
            self.analyzer.backend_name()
        );

        let outcome = match self.analyzer.analyze(&file).await {
            Ok(result) => self.cache.write(&result).map(|_| result).map_err(AppError::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                info!("Analysis of {} scored {}", file.name, result.score);
                self.state.send_replace(UploadState::Succeeded {
                    file: file.summary(),
                });
                Ok(result)
            }
            Err(e) => {
                error!("Upload of {} failed: {e}", file.name);
                self.state.send_replace(UploadState::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// "Upload a different file": back to `Idle` unless an upload is running.
    pub fn reset(&self) -> bool {
        self.state.send_if_modified(|state| match state {
            UploadState::Succeeded { .. } | UploadState::Failed { .. } => {
                *state = UploadState::Idle;
                true
            }
            UploadState::Idle | UploadState::Uploading => false,
        })
    }
}
