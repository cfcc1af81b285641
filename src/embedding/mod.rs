//! Deterministic hash-based pseudo-embeddings.
//!
//! No trained model, no external weights: a token's vector is a pure function of
//! its hashed id, so any "semantic" signal comes entirely from the collision
//! structure of the bounded vocabulary.

pub mod embedder;
pub mod vectorizer;


pub use embedder::TokenEmbedder;
pub use vectorizer::{Vectorizer, tokenize};
