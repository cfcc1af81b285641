use std::sync::Arc;

use moka::sync::Cache;

use crate::constants::{EMBEDDING_DIM, EMBEDDING_RANGE, VOCAB_SIZE};
use crate::hashing::token_id;

/// Deterministic token embedder.
///
/// Maps a token id to a fixed [`EMBEDDING_DIM`]-component vector via a 32-bit
/// xorshift generator seeded with `id + 1`, one iteration per component, each raw
/// word's low 16 bits mapped linearly onto `[-EMBEDDING_RANGE, EMBEDDING_RANGE]`.
/// Pure and total: the same id always yields the same vector, across calls and
/// across processes.
///
/// Vectors are memoized in a bounded in-process cache sized to the vocabulary.
/// The cache is transparent: regeneration always yields an identical vector, so
/// eviction only costs recomputation.
#[derive(Clone)]
pub struct TokenEmbedder {
    vectors: Cache<u32, Arc<[f32]>>,
}

impl TokenEmbedder {
    pub fn new() -> Self {
        Self {
            vectors: Cache::builder().max_capacity(u64::from(VOCAB_SIZE)).build(),
        }
    }

    /// Maps a word to its token id in `[0, VOCAB_SIZE)`.
    #[inline]
    pub fn token_id(word: &str) -> u32 {
        token_id(word)
    }

    /// Returns the embedding vector for a token id.
    pub fn token_vector(&self, id: u32) -> Arc<[f32]> {
        self.vectors.get_with(id, || generate_vector(id))
    }

    /// Returns the embedding vector for a word (hashing it first).
    #[inline]
    pub fn embed_word(&self, word: &str) -> Arc<[f32]> {
        self.token_vector(Self::token_id(word))
    }

    /// Number of currently cached vectors.
    pub fn cached_vectors(&self) -> u64 {
        self.vectors.entry_count()
    }
}

impl Default for TokenEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEmbedder")
            .field("cached_vectors", &self.vectors.entry_count())
            .finish()
    }
}

fn generate_vector(id: u32) -> Arc<[f32]> {
    // Seed is id + 1: ids start at 0 and xorshift has an all-zero fixed point.
    let mut state = id.wrapping_add(1);
    let mut components = Vec::with_capacity(EMBEDDING_DIM);

    for _ in 0..EMBEDDING_DIM {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;

        let low = (state & 0xFFFF) as f32;
        components.push(low / 65_535.0 * (2.0 * EMBEDDING_RANGE) - EMBEDDING_RANGE);
    }

    components.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_dimension() {
        let embedder = TokenEmbedder::new();
        assert_eq!(embedder.token_vector(0).len(), EMBEDDING_DIM);
        assert_eq!(embedder.token_vector(VOCAB_SIZE - 1).len(), EMBEDDING_DIM);
    }

    #[test]
    fn test_vector_component_range() {
        let embedder = TokenEmbedder::new();
        for id in [0, 1, 42, VOCAB_SIZE / 2, VOCAB_SIZE - 1] {
            for &c in embedder.token_vector(id).iter() {
                assert!(
                    (-EMBEDDING_RANGE..=EMBEDDING_RANGE).contains(&c),
                    "component {c} out of range for id {id}"
                );
            }
        }
    }

    #[test]
    fn test_vector_determinism_across_instances() {
        let a = TokenEmbedder::new();
        let b = TokenEmbedder::new();

        for id in [0, 7, 8191] {
            assert_eq!(a.token_vector(id).as_ref(), b.token_vector(id).as_ref());
        }
    }

    #[test]
    fn test_cache_transparency() {
        let embedder = TokenEmbedder::new();
        let cached = embedder.token_vector(99);
        let fresh = generate_vector(99);
        assert_eq!(cached.as_ref(), fresh.as_ref());
    }

    #[test]
    fn test_distinct_ids_distinct_vectors() {
        let embedder = TokenEmbedder::new();
        assert_ne!(
            embedder.token_vector(0).as_ref(),
            embedder.token_vector(1).as_ref()
        );
    }

    #[test]
    fn test_embed_word_matches_token_vector() {
        let embedder = TokenEmbedder::new();
        let id = TokenEmbedder::token_id("attention");
        assert_eq!(
            embedder.embed_word("attention").as_ref(),
            embedder.token_vector(id).as_ref()
        );
    }

    #[test]
    fn test_vector_not_all_zero() {
        let embedder = TokenEmbedder::new();
        assert!(embedder.token_vector(0).iter().any(|&c| c != 0.0));
    }
}
