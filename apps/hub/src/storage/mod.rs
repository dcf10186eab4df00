//! Local key/value storage for results that outlive a single command.
//!
//! Values are JSON text, keyed the same way the browser build keys its
//! local storage, so both front ends can read each other's state files.

pub mod cache;
pub mod json_file;
#[cfg(test)]
pub mod memory;

use thiserror::Error;

pub use cache::AnalysisCache;
pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

pub const LAST_SCORE_KEY: &str = "lastResumeScore";
pub const LAST_SUGGESTIONS_KEY: &str = "lastResumeSuggestions";
pub const APPLIED_JOBS_KEY: &str = "appliedJobs";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt value under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key/value store with last-writer-wins semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Writes every entry or none of them.
    fn set_many(&self, entries: Vec<(&str, String)>) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
