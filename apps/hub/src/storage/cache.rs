use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::{KeyValueStore, StoreError, LAST_SCORE_KEY, LAST_SUGGESTIONS_KEY};
use crate::models::AnalysisResult;

/// Typed view over the store for the most recent analysis.
#[derive(Clone)]
pub struct AnalysisCache {
    store: Arc<dyn KeyValueStore>,
}

impl AnalysisCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrites both keys in one batch: either both change or neither does.
    pub fn write(&self, result: &AnalysisResult) -> Result<(), StoreError> {
        self.store.set_many(vec![
            (LAST_SCORE_KEY, serde_json::to_string(&result.score)?),
            (
                LAST_SUGGESTIONS_KEY,
                serde_json::to_string(&result.suggestions)?,
            ),
        ])
    }

    /// `None` until the first successful upload.
    pub fn read(&self) -> Result<Option<AnalysisResult>, StoreError> {
        let Some(score) = read_json::<u32>(self.store.as_ref(), LAST_SCORE_KEY)? else {
            return Ok(None);
        };
        let suggestions =
            read_json::<Vec<String>>(self.store.as_ref(), LAST_SUGGESTIONS_KEY)?.unwrap_or_default();
        Ok(Some(AnalysisResult::new(score, suggestions)))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(LAST_SCORE_KEY)?;
        self.store.remove(LAST_SUGGESTIONS_KEY)
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(key)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}
