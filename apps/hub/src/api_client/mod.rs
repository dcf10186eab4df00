//! Backend client: the single point of entry for calls to the résumé-review backend.
//!
//! Every operation is one request with no retries, no timeout and no caching.
//! Non-2xx responses and transport failures both come back as `ApiError`,
//! except `check_backend_health`, which degrades to `false`.
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AnalysisResult, UploadedFile};

pub mod base_url;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a usable response: connection, URL or body decoding.
    #[error("Failed to {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {action}: {status_text}")]
    Status {
        action: &'static str,
        status: u16,
        status_text: String,
    },
}

impl ApiError {
    fn transport(action: &'static str) -> impl FnOnce(reqwest::Error) -> ApiError {
        move |source| ApiError::Transport { action, source }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { .. } => None,
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /resumes/upload with a multipart body with a single `file` field.
    /// The content-type header (and its boundary) is left to reqwest.
    pub async fn upload_resume(&self, file: &UploadedFile) -> Result<AnalysisResult, ApiError> {
        const ACTION: &str = "upload resume";

        let part = multipart::Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(ApiError::transport(ACTION))?;
        let form = multipart::Form::new().part("file", part);

        debug!(
            "Uploading {} ({} bytes) to {}",
            file.name,
            file.size(),
            self.base_url
        );

        let response = self
            .client
            .post(self.url("/resumes/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::transport(ACTION))?;

        read_json(ACTION, response).await
    }

    /// GET /resumes
    pub async fn get_resumes(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("fetch resumes", "/resumes").await
    }

    /// GET /resumes/:id
    pub async fn get_resume_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json("fetch resume", &format!("/resumes/{id}")).await
    }

    /// PUT /resumes/:id
    pub async fn update_resume_score(&self, id: &str, score: u32) -> Result<Value, ApiError> {
        const ACTION: &str = "update resume";
        let response = self
            .client
            .put(self.url(&format!("/resumes/{id}")))
            .json(&json!({ "score": score }))
            .send()
            .await
            .map_err(ApiError::transport(ACTION))?;
        read_json(ACTION, response).await
    }

    /// DELETE /resumes/:id. The body, if any, is ignored.
    pub async fn delete_resume(&self, id: &str) -> Result<(), ApiError> {
        const ACTION: &str = "delete resume";
        let response = self
            .client
            .delete(self.url(&format!("/resumes/{id}")))
            .send()
            .await
            .map_err(ApiError::transport(ACTION))?;
        ensure_success(ACTION, response).await.map(|_| ())
    }

    /// GET /jobs/suggestions?score=n
    pub async fn get_job_suggestions(&self, score: u32) -> Result<Vec<Value>, ApiError> {
        self.get_json(
            "fetch job suggestions",
            &format!("/jobs/suggestions?score={score}"),
        )
        .await
    }

    /// GET /jobs
    pub async fn get_jobs(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("fetch jobs", "/jobs").await
    }

    /// POST /jobs/:id/apply
    pub async fn apply_for_job(&self, job_id: &str, resume_id: &str) -> Result<Value, ApiError> {
        const ACTION: &str = "apply for job";
        let response = self
            .client
            .post(self.url(&format!("/jobs/{job_id}/apply")))
            .json(&json!({ "resumeId": resume_id }))
            .send()
            .await
            .map_err(ApiError::transport(ACTION))?;
        read_json(ACTION, response).await
    }

    /// GET /health. Never fails: any error reads as unhealthy.
    pub async fn check_backend_health(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Backend health check failed: {e}");
                false
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        action: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::transport(action))?;
        read_json(action, response).await
    }
}

async fn ensure_success(action: &'static str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string());
    warn!("Backend returned {} while trying to {}", status, action);
    Err(ApiError::Status {
        action,
        status: status.as_u16(),
        status_text,
    })
}

async fn read_json<T: DeserializeOwned>(
    action: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    ensure_success(action, response)
        .await?
        .json::<T>()
        .await
        .map_err(ApiError::transport(action))
}
