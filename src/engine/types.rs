use serde::{Deserialize, Serialize};

use crate::filter::FilterMeta;

/// An incoming post record, as handed over by the extraction collaborator.
///
/// `id` is an opaque deduplication key; `text` is the only scoring input and
/// tolerates absence (missing text degrades to empty-text scoring).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A tracked post and its current visibility.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: String,
    pub text: String,
    pub visible: bool,
}

impl From<Candidate> for PostRecord {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            text: candidate.text,
            visible: true,
        }
    }
}

/// Per-post visibility decision emitted after every pass.
///
/// Decisions are exhaustive over the known post set, so effect application is
/// idempotent: re-applying a decision stream is always safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub id: String,
    pub visible: bool,
}

/// Aggregate outcome of one filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Monotonic pass counter (0 means no pass has run yet).
    pub seq: u64,
    /// Posts known to the session at pass time.
    pub total: usize,
    /// Posts hidden after the pass.
    pub hidden: usize,
}

/// Result of applying one command line.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// A filter was added and a full pass ran.
    Applied {
        filter: FilterMeta,
        report: PassReport,
    },
    /// The command produced no filter (empty or unrecognized input).
    Ignored,
}
