//! Filter persistence error types.

use thiserror::Error;

/// Errors from loading or saving the filter snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(any(test, feature = "mock"))]
    #[error("injected store failure")]
    Injected,
}
