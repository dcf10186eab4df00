//! Analyzer seam: who turns an uploaded résumé into a score.
//!
//! `BackendClient` talks to the real scoring backend. `SimulatedAnalyzer`
//! backs the lite build: it waits a fixed delay and answers with sample data.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api_client::BackendClient;
use crate::errors::AppError;
use crate::models::{AnalysisResult, UploadedFile};

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResult, AppError>;

    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl ResumeAnalyzer for BackendClient {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResult, AppError> {
        Ok(self.upload_resume(file).await?)
    }

    fn backend_name(&self) -> &'static str {
        "backend"
    }
}

pub const SIMULATED_DELAY: Duration = Duration::from_millis(1500);
pub const SAMPLE_SCORE: u32 = 78;

pub fn sample_suggestions() -> Vec<String> {
    vec![
        "Add more quantifiable achievements".to_string(),
        "Include relevant certifications".to_string(),
    ]
}

#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedAnalyzer {
    fn default() -> Self {
        Self::new(SIMULATED_DELAY)
    }
}

#[async_trait]
impl ResumeAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResult, AppError> {
        debug!("Simulating analysis of {} for {:?}", file.name, self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(AnalysisResult::new(SAMPLE_SCORE, sample_suggestions()))
    }

    fn backend_name(&self) -> &'static str {
        "simulated"
    }
}
