use crate::constants::{EMBEDDING_DIM, attention_scale};
use crate::embedding::Vectorizer;

use super::cosine_similarity;

/// Result of one attention pass over a document.
#[derive(Debug, Clone)]
pub struct Attention {
    /// Cosine similarity between the context vector and the query, in `[-1, 1]`.
    pub relevance: f32,
    /// Per-token attention weights, summing to 1 for non-empty input.
    ///
    /// Exposed for explainability; the filtering engine only consumes
    /// `relevance`.
    pub weights: Vec<f32>,
}

impl Attention {
    fn empty() -> Self {
        Self {
            relevance: 0.0,
            weights: Vec::new(),
        }
    }
}

/// Single-head scaled-dot-product attention scorer.
///
/// The crate's only "model". It has no trained parameters: raw scores are
/// `dot(e_i, query) / sqrt(dim)`, softmaxed into weights, reduced to a context
/// vector, and scored against the query by cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct AttentionScorer {
    vectorizer: Vectorizer,
}

impl AttentionScorer {
    pub fn new(vectorizer: Vectorizer) -> Self {
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Scores a document against a query vector.
    ///
    /// Empty text yields relevance 0 and an empty weight sequence.
    pub fn score(&self, text: &str, query: &[f32]) -> Attention {
        let vectors = self.vectorizer.token_vectors(text);
        if vectors.is_empty() {
            return Attention::empty();
        }

        let scale = attention_scale();
        let scores: Vec<f32> = vectors
            .iter()
            .map(|e| dot(e, query) / scale)
            .collect();

        // Numerically stable softmax: subtract the max before exponentiating.
        let max = scores.iter().fold(f32::NEG_INFINITY, |m, &s| m.max(s));
        let exps: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
        let sum: f32 = exps.iter().sum();
        // Defined fallback divisor of 1 for a zero exponent sum.
        let divisor = if sum == 0.0 { 1.0 } else { sum };
        let weights: Vec<f32> = exps.iter().map(|&e| e / divisor).collect();

        let mut context = vec![0.0f32; EMBEDDING_DIM];
        for (&w, e) in weights.iter().zip(&vectors) {
            for (c, &v) in context.iter_mut().zip(e.iter()) {
                *c += w * v;
            }
        }

        Attention {
            relevance: cosine_similarity(&context, query),
            weights,
        }
    }

    /// Convenience wrapper returning only the relevance scalar.
    #[inline]
    pub fn relevance(&self, text: &str, query: &[f32]) -> f32 {
        self.score(text, query).relevance
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
}
