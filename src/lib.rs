//! Sift library crate (used by the binary and integration tests).
//!
//! Attention-based relevance scoring and ranked filtering for streamed feed
//! posts: a deterministic hash-based pseudo-embedding, a single-head
//! scaled-dot-product attention scorer, and an incremental filtering engine
//! driven by batched arrival.
//!
//! # Public API Surface
//!
//! ## Core Engine
//! - [`FeedCoordinator`], [`FeedHandle`] - The single-writer actor and its handle
//! - [`Candidate`], [`Decision`], [`PassReport`], [`CommandOutcome`] - Wire types
//! - [`Batcher`], [`SessionState`], [`run_pass`] - Engine internals for direct use
//!
//! ## Embedding & Scoring
//! - [`TokenEmbedder`], [`Vectorizer`], [`tokenize`] - Deterministic text encoding
//! - [`AttentionScorer`], [`Attention`], [`cosine_similarity`] - Relevance scoring
//!
//! ## Commands & Filters
//! - [`CommandParser`], [`CommandError`] - Free-text command interpretation
//! - [`Filter`], [`FilterMode`], [`FilterMeta`] - Filter descriptors
//! - [`FilterStore`], [`JsonFilterStore`] - Vector-free persistence seam
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `SIFT_*` environment configuration
//!
//! ## Constants
//! Vocabulary, dimension, and cadence constants are exported for consistency
//! across modules.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod command;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod filter;
pub mod hashing;
pub mod scoring;

pub use command::{CommandError, CommandParser};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DEBOUNCE_MS, DEFAULT_HIDE_THRESHOLD, DEFAULT_SHOW_TOP_K,
    EMBEDDING_DIM, VOCAB_SIZE,
};
pub use embedding::{TokenEmbedder, Vectorizer, tokenize};
pub use engine::{
    Batcher, Candidate, CommandOutcome, Decision, EngineError, FeedCoordinator, FeedHandle,
    PassReport, PostRecord, SessionState, run_pass,
};
pub use filter::{Filter, FilterMeta, FilterMode, FilterStore, JsonFilterStore, StoreError};
#[cfg(any(test, feature = "mock"))]
pub use filter::MemoryFilterStore;
pub use hashing::{fnv1a_32, hash_post_id, token_id};
pub use scoring::{Attention, AttentionScorer, cosine_similarity};
