//! Vector math for embedding similarity.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Every component below this magnitude marks a degenerate zero vector.
const ZERO_COMPONENT_EPSILON: f32 = 1e-10;

/// Compute the cosine similarity between two embeddings, clamped to [0, 1].
///
/// Negative cosine values (semantically opposite vectors) collapse to 0:
/// ranking only cares how similar two texts are, not how opposite. A zero
/// vector on either side yields 0 ("no signal") rather than an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        warn!("zero vector in cosine similarity computation");
        return Ok(0.0);
    }

    Ok((dot_product / (magnitude_a * magnitude_b)).clamp(0.0, 1.0))
}

/// Check that a freshly generated embedding is usable for scoring.
///
/// Rejects vectors containing NaN or infinite components, and vectors whose
/// every component is below `1e-10` in magnitude. Callers should reject or
/// retry generation rather than score against a degenerate vector.
pub fn is_valid_embedding(embedding: &[f32]) -> bool {
    if embedding.iter().any(|v| !v.is_finite()) {
        error!("embedding contains NaN or infinite components");
        return false;
    }

    if embedding.iter().all(|v| v.abs() < ZERO_COMPONENT_EPSILON) {
        error!("embedding is effectively a zero vector");
        return false;
    }

    true
}

/// A corpus document scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Original document text.
    pub text: String,

    /// Clamped cosine similarity between query and document, in [0, 1].
    pub accuracy: f32,
}

impl ScoredResult {
    /// Create a new scored result.
    pub fn new(text: impl Into<String>, accuracy: f32) -> Self {
        Self {
            text: text.into(),
            accuracy,
        }
    }
}

/// Sort results by accuracy descending.
///
/// The sort is stable, so ties keep their original corpus order and repeated
/// searches produce identical orderings.
pub fn sort_by_accuracy(results: &mut [ScoredResult]) {
    results.sort_by_key(|r| Reverse(OrderedFloat(r.accuracy)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, 0.5, 0.2];
        let b = vec![0.1, 0.9, 0.4];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite_clamps_to_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(matches!(
            cosine_similarity(&a, &b),
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_valid_embedding() {
        assert!(is_valid_embedding(&[0.1, -0.2, 0.3]));
    }

    #[test]
    fn test_invalid_embedding_nan() {
        assert!(!is_valid_embedding(&[0.1, f32::NAN, 0.3]));
    }

    #[test]
    fn test_invalid_embedding_infinite() {
        assert!(!is_valid_embedding(&[0.1, f32::INFINITY, 0.3]));
    }

    #[test]
    fn test_invalid_embedding_zero_vector() {
        assert!(!is_valid_embedding(&[0.0, 1e-12, -1e-11]));
    }

    #[test]
    fn test_sort_by_accuracy_descending() {
        let mut results = vec![
            ScoredResult::new("low", 0.1),
            ScoredResult::new("high", 0.9),
            ScoredResult::new("mid", 0.5),
        ];
        sort_by_accuracy(&mut results);
        assert_eq!(results[0].text, "high");
        assert_eq!(results[1].text, "mid");
        assert_eq!(results[2].text, "low");
    }

    #[test]
    fn test_sort_by_accuracy_ties_keep_input_order() {
        let mut results = vec![
            ScoredResult::new("first", 0.5),
            ScoredResult::new("second", 0.5),
            ScoredResult::new("third", 0.5),
        ];
        sort_by_accuracy(&mut results);
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
