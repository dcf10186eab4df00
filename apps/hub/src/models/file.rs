use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Serialize;

/// A résumé picked or dropped by the user. Lives for a single upload attempt.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Media type as declared by the picker. Not trusted for validation.
    pub media_type: String,
    pub content: Bytes,
}

/// What survives of a file once its upload has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub media_type: String,
    pub size: usize,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content,
        }
    }

    /// Reads a file from disk, declaring its media type from the extension
    /// the way a browser file picker would.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let media_type = media_type_for_name(&name);
        Ok(Self::new(name, media_type, Bytes::from(content)))
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            size: self.size(),
        }
    }
}

fn media_type_for_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
