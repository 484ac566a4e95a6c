//! Classification client contract
//!
//! A classifier turns one ordered batch of raw comment strings into one
//! result per comment. The whole batch succeeds or fails as a unit: there is
//! no retry and no partial-result recovery.

use async_trait::async_trait;
use ctriage_common::ClassificationResult;
use thiserror::Error;

/// Classification client errors
///
/// Every variant is a classification failure from the pipeline's point of
/// view; the variants only differ in what gets logged.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("No comments to classify")]
    EmptyBatch,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Classification service returned an empty response")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Classification service returned {actual} results for {expected} comments")]
    CountMismatch { expected: usize, actual: usize },
}

/// Batch comment classifier
#[async_trait]
pub trait CommentClassifier: Send + Sync {
    /// Classifier name for logging
    fn name(&self) -> &'static str;

    /// Classify a non-empty batch, returning one result per comment in order
    async fn classify(
        &self,
        comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ClassificationError>;
}

/// Validate a parsed batch and fill empty replies
///
/// A result count that differs from the submitted count breaks the
/// one-to-one correspondence with the input and fails the whole batch.
/// Unrecognized categories pass through untouched.
pub fn finalize_batch(
    expected: usize,
    results: Vec<ClassificationResult>,
) -> Result<Vec<ClassificationResult>, ClassificationError> {
    if results.len() != expected {
        return Err(ClassificationError::CountMismatch {
            expected,
            actual: results.len(),
        });
    }

    Ok(results
        .into_iter()
        .map(ClassificationResult::with_fallback_reply)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_rejects_count_mismatch() {
        let results = vec![ClassificationResult::new("a", "praise", "x")];
        let err = finalize_batch(2, results).unwrap_err();
        assert!(matches!(err, ClassificationError::CountMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_finalize_keeps_order_and_unknowns() {
        let results = vec![
            ClassificationResult::new("a", "threat", ""),
            ClassificationResult::new("b", "mystery", "hm"),
        ];
        let finalized = finalize_batch(2, results).unwrap();
        assert_eq!(finalized[0].original_text, "a");
        assert!(finalized[0].reply.starts_with("[URGENT]"));
        assert_eq!(finalized[1].category.as_str(), "mystery");
        assert_eq!(finalized[1].reply, "hm");
    }
}
