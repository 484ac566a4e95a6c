//! Classification handlers
//!
//! POST /api/classify/single, POST /api/classify/batch

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use ctriage_common::{CategoryCount, ClassificationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiResult,
    pipeline::{self, PaneState, PipelineError},
    services::IngestedBatch,
    AppState,
};

/// Request body limit for uploads
///
/// The whole file arrives in one body; ingestion keeps the first 200 lines.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// POST /api/classify/single request
#[derive(Debug, Deserialize)]
pub struct SingleRequest {
    #[serde(default)]
    pub comment: String,
}

/// POST /api/classify/batch request (raw file content)
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub content: String,
}

/// Pane contents after a submission
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// True when the input held nothing to classify
    pub skipped: bool,
    pub batch_id: Option<Uuid>,
    pub results: Vec<ClassificationResult>,
    pub stats: Vec<CategoryCount>,
    /// Ingestion counters (batch uploads only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingestion: Option<IngestionSummary>,
}

#[derive(Debug, Serialize)]
pub struct IngestionSummary {
    pub lines_read: usize,
    pub header_dropped: bool,
    pub forwarded: usize,
    pub truncated: usize,
}

impl From<&IngestedBatch> for IngestionSummary {
    fn from(batch: &IngestedBatch) -> Self {
        Self {
            lines_read: batch.lines_read,
            header_dropped: batch.header_dropped,
            forwarded: batch.len(),
            truncated: batch.truncated,
        }
    }
}

impl ClassifyResponse {
    fn from_state(state: Option<PaneState>, ingestion: Option<IngestionSummary>) -> Self {
        match state {
            Some(state) => Self {
                skipped: false,
                batch_id: state.batch_id,
                stats: state.stats(),
                results: state.results,
                ingestion,
            },
            None => Self {
                skipped: true,
                batch_id: None,
                results: Vec::new(),
                stats: Vec::new(),
                ingestion,
            },
        }
    }
}

/// POST /api/classify/single
///
/// Blank comments are ignored and answered with `skipped: true`.
pub async fn classify_single(
    State(state): State<AppState>,
    request: Result<Json<SingleRequest>, JsonRejection>,
) -> ApiResult<Json<ClassifyResponse>> {
    let Json(request) = request?;
    let outcome = pipeline::classify_single(
        &state.workspace,
        state.classifier.as_ref(),
        &request.comment,
    )
    .await;
    let pane_state = record_outcome(&state, outcome).await?;

    Ok(Json(ClassifyResponse::from_state(pane_state, None)))
}

/// POST /api/classify/batch
///
/// Content is split into lines, a header row is dropped and at most 200
/// comments are forwarded in one request.
pub async fn classify_batch(
    State(state): State<AppState>,
    request: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Json<ClassifyResponse>> {
    let Json(request) = request?;
    let outcome = pipeline::classify_upload(
        &state.workspace,
        state.classifier.as_ref(),
        &request.content,
    )
    .await;
    let outcome = record_outcome(&state, outcome).await?;

    let summary = IngestionSummary::from(&outcome.ingestion);
    Ok(Json(ClassifyResponse::from_state(outcome.state, Some(summary))))
}

/// Keep the latest classification failure for the health endpoint
async fn record_outcome<T>(
    state: &AppState,
    outcome: Result<T, PipelineError>,
) -> Result<T, PipelineError> {
    if let Err(err @ PipelineError::Classification { .. }) = &outcome {
        *state.last_error.write().await = Some(err.to_string());
    }
    outcome
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classify/single", post(classify_single))
        .route(
            "/api/classify/batch",
            post(classify_batch).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
