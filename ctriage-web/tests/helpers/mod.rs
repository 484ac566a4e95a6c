//! Test Helper Utilities
//!
//! Stand-in classifiers for exercising the pipeline without the network.

#![allow(dead_code)]

use async_trait::async_trait;
use ctriage_common::ClassificationResult;
use ctriage_web::services::{ClassificationError, CommentClassifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Pick a category from keywords in the comment (defaults to praise)
pub fn keyword_category(comment: &str) -> &'static str {
    let lowered = comment.to_lowercase();
    if lowered.contains("idiot") {
        "hate_abuse"
    } else if lowered.contains("watch your back") {
        "threat"
    } else if lowered.contains("follow me") {
        "spam_irrelevant"
    } else if lowered.contains("?") {
        "question_suggestion"
    } else if lowered.contains("weird") {
        "sarcasm"
    } else {
        "praise"
    }
}

/// Echoes every comment back with a keyword-based category
#[derive(Default)]
pub struct StubClassifier {
    pub calls: AtomicUsize,
    pub batch_sizes: std::sync::Mutex<Vec<usize>>,
}

impl StubClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentClassifier for StubClassifier {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn classify(
        &self,
        comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(comments.len());
        Ok(comments
            .iter()
            .map(|c| ClassificationResult::new(c.clone(), keyword_category(c), format!("re: {}", c)))
            .collect())
    }
}

/// Always fails like an unreachable service
#[derive(Default)]
pub struct FailingClassifier {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CommentClassifier for FailingClassifier {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn classify(
        &self,
        _comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassificationError::NetworkError("connection refused".to_string()))
    }
}

/// Holds every request until released, to observe in-flight state
pub struct GatedClassifier {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    inner: StubClassifier,
}

impl GatedClassifier {
    pub fn new() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            inner: StubClassifier::default(),
        }
    }
}

#[async_trait]
impl CommentClassifier for GatedClassifier {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn classify(
        &self,
        comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.classify(comments).await
    }
}
