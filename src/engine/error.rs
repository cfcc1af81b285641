//! Engine error types.

use thiserror::Error;

use crate::command::CommandError;
use crate::filter::StoreError;

/// Errors surfaced through the coordinator handle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    #[error("filter store error: {0}")]
    Store(#[from] StoreError),

    #[error("no filter at index {index}")]
    UnknownFilter { index: usize },

    /// The coordinator task has stopped (shutdown or panic).
    #[error("feed coordinator is closed")]
    Closed,
}
