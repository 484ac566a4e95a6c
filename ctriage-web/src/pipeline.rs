//! Classification pipeline state
//!
//! Each view pane (single comment, batch upload) owns an explicit
//! [`PaneState`] value plus a busy flag. A submission:
//! 1. acquires the pane's [`BusyGuard`] (a concurrent submission is rejected)
//! 2. calls the classifier once for the whole batch
//! 3. replaces the pane's results on success, or records one failure
//!    message and keeps the previous results on error
//!
//! The guard is released on drop, so the busy flag clears on every path.

use chrono::{DateTime, Utc};
use ctriage_common::{CategoryCount, ClassificationResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::{aggregate, filter, ingest_batch, ingest_single, IngestedBatch};
use crate::services::{ClassificationError, CommentClassifier};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A submission is already in flight on this pane
    #[error("A {0} classification is already in progress")]
    Busy(PaneKind),

    /// The classification call failed; no results were applied
    #[error("Classification failed: {source}")]
    Classification {
        batch_id: Uuid,
        #[source]
        source: ClassificationError,
    },
}

/// View pane identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneKind {
    Single,
    Batch,
}

impl PaneKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "single" => Some(PaneKind::Single),
            "batch" => Some(PaneKind::Batch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaneKind::Single => "single",
            PaneKind::Batch => "batch",
        }
    }
}

impl std::fmt::Display for PaneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Results currently shown in a pane
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaneState {
    pub results: Vec<ClassificationResult>,
    /// Batch that produced `results`
    pub batch_id: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Message of the most recent failed submission
    pub last_error: Option<String>,
}

impl PaneState {
    /// State after a successful submission; replaces all previous results
    pub fn with_results(self, batch_id: Uuid, results: Vec<ClassificationResult>) -> Self {
        Self {
            results,
            batch_id: Some(batch_id),
            completed_at: Some(Utc::now()),
            last_error: None,
        }
    }

    /// State after a failed submission; previous results are kept
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        Self {
            last_error: Some(message.into()),
            ..self
        }
    }

    /// Category distribution of the current results
    pub fn stats(&self) -> Vec<CategoryCount> {
        aggregate(&self.results)
    }

    pub fn filtered(&self, selector: &str) -> Vec<ClassificationResult> {
        filter(&self.results, selector)
    }
}

/// Clears the pane's busy flag when dropped
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One view pane: state plus in-flight flag
#[derive(Debug)]
pub struct Pane {
    kind: PaneKind,
    busy: AtomicBool,
    state: RwLock<PaneState>,
}

impl Pane {
    pub fn new(kind: PaneKind) -> Self {
        Self {
            kind,
            busy: AtomicBool::new(false),
            state: RwLock::new(PaneState::default()),
        }
    }

    pub fn kind(&self) -> PaneKind {
        self.kind
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Mark the pane busy, or fail if a submission is already in flight
    pub fn try_acquire(&self) -> Result<BusyGuard<'_>, PipelineError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard { flag: &self.busy })
            .map_err(|_| PipelineError::Busy(self.kind))
    }

    pub async fn snapshot(&self) -> PaneState {
        self.state.read().await.clone()
    }

    /// Classify one batch and apply the outcome to this pane
    ///
    /// Returns the updated state on success. On failure the previous results
    /// stay in place and the error is recorded once in `last_error`.
    pub async fn submit(
        &self,
        classifier: &dyn CommentClassifier,
        comments: Vec<String>,
    ) -> Result<PaneState, PipelineError> {
        let _guard = self.try_acquire()?;
        let batch_id = Uuid::new_v4();

        tracing::info!(
            pane = %self.kind,
            batch_id = %batch_id,
            count = comments.len(),
            classifier = classifier.name(),
            "Classification batch dispatched"
        );

        let outcome = classifier.classify(&comments).await;

        let mut state = self.state.write().await;
        let current = std::mem::take(&mut *state);
        match outcome {
            Ok(results) => {
                *state = current.with_results(batch_id, results);
                tracing::info!(
                    pane = %self.kind,
                    batch_id = %batch_id,
                    count = state.results.len(),
                    "Classification batch completed"
                );
                Ok(state.clone())
            }
            Err(source) => {
                tracing::warn!(
                    pane = %self.kind,
                    batch_id = %batch_id,
                    error = %source,
                    "Classification batch failed"
                );
                *state = current.with_failure(source.to_string());
                Err(PipelineError::Classification { batch_id, source })
            }
        }
    }
}

/// Both view panes; each has an independent busy flag
#[derive(Debug)]
pub struct Workspace {
    pub single: Pane,
    pub batch: Pane,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            single: Pane::new(PaneKind::Single),
            batch: Pane::new(PaneKind::Batch),
        }
    }

    pub fn pane(&self, kind: PaneKind) -> &Pane {
        match kind {
            PaneKind::Single => &self.single,
            PaneKind::Batch => &self.batch,
        }
    }
}

/// Outcome of an upload submission
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub ingestion: IngestedBatch,
    /// `None` when the upload held no comments and nothing was sent
    pub state: Option<PaneState>,
}

/// Classify one typed comment on the single pane
///
/// Blank input is ignored: returns `Ok(None)` without calling the classifier.
pub async fn classify_single(
    workspace: &Workspace,
    classifier: &dyn CommentClassifier,
    comment: &str,
) -> Result<Option<PaneState>, PipelineError> {
    match ingest_single(comment) {
        Some(comments) => workspace.single.submit(classifier, comments).await.map(Some),
        None => {
            tracing::debug!("Blank comment submitted, skipping classification");
            Ok(None)
        }
    }
}

/// Ingest uploaded content and classify it on the batch pane
pub async fn classify_upload(
    workspace: &Workspace,
    classifier: &dyn CommentClassifier,
    content: &str,
) -> Result<BatchOutcome, PipelineError> {
    let ingestion = ingest_batch(content);
    if ingestion.is_empty() {
        tracing::debug!(
            lines_read = ingestion.lines_read,
            "Upload holds no comments, skipping classification"
        );
        return Ok(BatchOutcome { ingestion, state: None });
    }

    let state = workspace
        .batch
        .submit(classifier, ingestion.comments.clone())
        .await?;
    Ok(BatchOutcome {
        ingestion,
        state: Some(state),
    })
}
