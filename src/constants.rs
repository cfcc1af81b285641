//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants (e.g. the attention scale) from primary ones
//! to avoid drift.
//!
//! # Dimension Invariants
//!
//! [`EMBEDDING_DIM`] and [`VOCAB_SIZE`] are treated as compile-time invariants across
//! the embedding, scoring, and engine modules. Every vector produced by this crate has
//! exactly `EMBEDDING_DIM` components, so no runtime dimension negotiation exists: a
//! mismatched slice length at a scoring boundary degrades to a zero score (see
//! [`crate::scoring::cosine_similarity`]) rather than a fault.

/// Number of token-id buckets. Distinct words deliberately alias within this bound.
pub const VOCAB_SIZE: u32 = 8192;

/// Dimension of every token, query, and context vector.
pub const EMBEDDING_DIM: usize = 128;

/// Half-width of the embedding component range: components lie in [-0.1, 0.1].
pub const EMBEDDING_RANGE: f32 = 0.1;

/// Posts buffered before a scoring pass triggers immediately.
pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Idle debounce before a partial buffer is scored anyway, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Relevance at or above which a hide-mode filter suppresses a post.
pub const DEFAULT_HIDE_THRESHOLD: f32 = 0.5;

/// Number of posts a show-mode filter retains when the command names no count.
pub const DEFAULT_SHOW_TOP_K: usize = 20;

/// Mailbox capacity of the coordinator actor.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Scaled-dot-product attention divisor, `sqrt(EMBEDDING_DIM)`.
///
/// Fixed to the embedding dimension's square root so raw attention scores do not
/// grow with dimensionality.
pub fn attention_scale() -> f32 {
    (EMBEDDING_DIM as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attention_scale_matches_dimension() {
        let scale = attention_scale();
        assert!((scale * scale - EMBEDDING_DIM as f32).abs() < 1e-3);
    }

    #[test]
    fn test_vocab_fits_u32_modulus() {
        assert!(VOCAB_SIZE > 0);
        assert!(u64::from(VOCAB_SIZE) + 1 < u64::from(u32::MAX));
    }
}
