// Upload workflow: validation, the analyzer seam and the single-flight state machine.

pub mod analyzer;
pub mod file_kind;
pub mod workflow;

pub use analyzer::{ResumeAnalyzer, SimulatedAnalyzer};
pub use workflow::{InputSource, UploadState, UploadWorkflow};
