//! Filter descriptors and their vector-free persisted form.

pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use store::{FilterStore, JsonFilterStore};

#[cfg(any(test, feature = "mock"))]
pub use store::MemoryFilterStore;

use serde::{Deserialize, Serialize};

use crate::embedding::Vectorizer;

/// Filtering policy of a single filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Suppress posts whose relevance meets the threshold.
    Hide,
    /// Retain only the top-K posts by relevance; hide everything else.
    Show,
}

/// An active filter: the durable four fields plus the derived query vector.
///
/// The vector is never persisted. It is a pure function of the query text
/// (`Filter::from_meta` rebuilds it), so restored filters score identically to
/// freshly created ones.
#[derive(Debug, Clone)]
pub struct Filter {
    pub query: String,
    pub mode: FilterMode,
    pub top_k: usize,
    pub threshold: f32,
    pub query_vector: Vec<f32>,
}

impl Filter {
    /// Creates a filter, deriving the query vector from the query text.
    pub fn new(
        query: impl Into<String>,
        mode: FilterMode,
        top_k: usize,
        threshold: f32,
        vectorizer: &Vectorizer,
    ) -> Self {
        let query = query.into();
        let query_vector = vectorizer.mean_vector(&query);
        Self {
            query,
            mode,
            top_k,
            threshold,
            query_vector,
        }
    }

    /// Rebuilds a filter from persisted metadata (vector derived from text).
    pub fn from_meta(meta: FilterMeta, vectorizer: &Vectorizer) -> Self {
        Self::new(meta.query, meta.mode, meta.top_k, meta.threshold, vectorizer)
    }

    /// The durable, vector-free form handed to persistence collaborators.
    pub fn meta(&self) -> FilterMeta {
        FilterMeta {
            query: self.query.clone(),
            mode: self.mode,
            top_k: self.top_k,
            threshold: self.threshold,
        }
    }
}

/// Persisted filter metadata: `{query, mode, topK, threshold}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterMeta {
    pub query: String,
    pub mode: FilterMode,
    pub top_k: usize,
    pub threshold: f32,
}
