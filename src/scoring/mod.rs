//! Relevance scoring: cosine similarity plus single-head attention.

pub mod attention;


pub use attention::{Attention, AttentionScorer};

/// Cosine similarity between two equal-length vectors, in `[-1, 1]`.
///
/// Returns exactly `0.0` for mismatched lengths, empty slices, or a zero-norm
/// side. The zero default is the contract, not an error path: this sits on the
/// hot per-post scoring loop and must never abort a pass.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
