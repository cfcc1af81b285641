use std::sync::Arc;

use crate::constants::EMBEDDING_DIM;

use super::embedder::TokenEmbedder;

/// Splits text into lower-cased tokens on runs of whitespace.
///
/// No stemming, no stopwords; blank input yields an empty sequence. This is the
/// single tokenization rule every vector in the crate is built from.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Aggregates token embeddings into text-level representations.
///
/// Queries use [`mean_vector`](Vectorizer::mean_vector); documents keep their
/// per-token vectors for attention via [`token_vectors`](Vectorizer::token_vectors).
/// Cloning shares the underlying embedder cache.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    embedder: TokenEmbedder,
}

impl Vectorizer {
    pub fn new() -> Self {
        Self {
            embedder: TokenEmbedder::new(),
        }
    }

    pub fn embedder(&self) -> &TokenEmbedder {
        &self.embedder
    }

    /// Unweighted mean of the text's token vectors.
    ///
    /// Blank input returns the all-zero vector, a defined edge case rather than
    /// an error: downstream cosine similarity treats zero-norm vectors as
    /// similarity 0.
    pub fn mean_vector(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut mean = vec![0.0f32; EMBEDDING_DIM];
        if tokens.is_empty() {
            return mean;
        }

        for token in &tokens {
            let vector = self.embedder.embed_word(token);
            for (m, v) in mean.iter_mut().zip(vector.iter()) {
                *m += v;
            }
        }

        let count = tokens.len() as f32;
        for m in &mut mean {
            *m /= count;
        }
        mean
    }

    /// Per-token vectors in original order, duplicates unreduced.
    pub fn token_vectors(&self, text: &str) -> Vec<Arc<[f32]>> {
        tokenize(text)
            .iter()
            .map(|token| self.embedder.embed_word(token))
            .collect()
    }

    /// Mean of the per-text mean vectors, skipping blank texts.
    ///
    /// Builds an interest profile from several phrases. All-blank input yields
    /// the zero vector.
    pub fn centroid(&self, texts: &[&str]) -> Vec<f32> {
        let mut centroid = vec![0.0f32; EMBEDDING_DIM];
        let mut counted = 0usize;

        for text in texts {
            if tokenize(text).is_empty() {
                continue;
            }
            let mean = self.mean_vector(text);
            for (c, m) in centroid.iter_mut().zip(mean.iter()) {
                *c += m;
            }
            counted += 1;
        }

        if counted > 0 {
            let count = counted as f32;
            for c in &mut centroid {
                *c /= count;
            }
        }
        centroid
    }
}
