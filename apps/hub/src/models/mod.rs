pub mod analysis;
pub mod file;

pub use analysis::AnalysisResult;
pub use file::{FileSummary, UploadedFile};
