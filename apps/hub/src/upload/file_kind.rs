use serde::Serialize;

use crate::errors::AppError;
use crate::models::UploadedFile;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Résumé formats accepted for analysis, recognised by content rather than
/// by the declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    /// Legacy Word (OLE2 compound document).
    Doc,
    /// Office Open XML; any ZIP container is accepted.
    Docx,
}

impl FileKind {
    pub fn detect(content: &[u8]) -> Option<Self> {
        if content.starts_with(PDF_MAGIC) {
            Some(FileKind::Pdf)
        } else if content.starts_with(OLE2_MAGIC) {
            Some(FileKind::Doc)
        } else if content.starts_with(ZIP_MAGIC) {
            Some(FileKind::Docx)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Doc => "DOC",
            FileKind::Docx => "DOCX",
        }
    }
}

/// Applied identically to dropped and picked files.
pub fn validate(file: &UploadedFile) -> Result<FileKind, AppError> {
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge {
            size: file.size(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    FileKind::detect(&file.content).ok_or_else(|| {
        AppError::UnsupportedFile(format!(
            "{} is not a PDF, DOC or DOCX document",
            file.name
        ))
    })
}
