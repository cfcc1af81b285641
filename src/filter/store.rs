use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FilterMeta;
use super::error::StoreError;

/// Persistence seam for filter metadata.
///
/// Only the vector-free tuples cross this boundary; query vectors are rebuilt
/// from text on load.
#[async_trait]
pub trait FilterStore: Send + Sync {
    /// Loads the saved filter list. A missing snapshot is an empty list, not an
    /// error.
    async fn load(&self) -> Result<Vec<FilterMeta>, StoreError>;

    /// Replaces the saved filter list.
    async fn save(&self, filters: &[FilterMeta]) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    saved_at: DateTime<Utc>,
    filters: Vec<FilterMeta>,
}

/// Filter store backed by a single JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonFilterStore {
    path: PathBuf,
}

impl JsonFilterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl FilterStore for JsonFilterStore {
    async fn load(&self) -> Result<Vec<FilterMeta>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No filter snapshot, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        debug!(
            path = %self.path.display(),
            count = snapshot.filters.len(),
            saved_at = %snapshot.saved_at,
            "Loaded filter snapshot"
        );
        Ok(snapshot.filters)
    }

    async fn save(&self, filters: &[FilterMeta]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let snapshot = Snapshot {
            saved_at: Utc::now(),
            filters: filters.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;

        debug!(
            path = %self.path.display(),
            count = filters.len(),
            "Saved filter snapshot"
        );
        Ok(())
    }
}

/// In-memory filter store for tests and examples.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MemoryFilterStore {
    filters: parking_lot::Mutex<Vec<FilterMeta>>,
    fail_next_save: parking_lot::Mutex<bool>,
}

#[cfg(any(test, feature = "mock"))]
impl MemoryFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the saved filter list (simulates a prior session's snapshot).
    pub fn with_filters(filters: Vec<FilterMeta>) -> Self {
        Self {
            filters: parking_lot::Mutex::new(filters),
            fail_next_save: parking_lot::Mutex::new(false),
        }
    }

    /// Makes the next `save` call fail, for persist-then-commit tests.
    pub fn fail_next_save(&self) {
        *self.fail_next_save.lock() = true;
    }

    /// Returns the currently saved filter list.
    pub fn saved(&self) -> Vec<FilterMeta> {
        self.filters.lock().clone()
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl FilterStore for MemoryFilterStore {
    async fn load(&self) -> Result<Vec<FilterMeta>, StoreError> {
        Ok(self.filters.lock().clone())
    }

    async fn save(&self, filters: &[FilterMeta]) -> Result<(), StoreError> {
        if std::mem::take(&mut *self.fail_next_save.lock()) {
            return Err(StoreError::Injected);
        }
        *self.filters.lock() = filters.to_vec();
        Ok(())
    }
}
