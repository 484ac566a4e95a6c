//! Pane snapshot and CSV export handlers
//!
//! GET /api/panes/:pane, GET /api/panes/:pane/export

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use ctriage_common::categories::ALL_CATEGORIES;
use ctriage_common::{CategoryCount, ClassificationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    pipeline::PaneKind,
    services::export,
    AppState,
};

/// Category selector query (`?category=hate_abuse`, default `all`)
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default = "default_selector")]
    pub category: String,
}

fn default_selector() -> String {
    ALL_CATEGORIES.to_string()
}

/// GET /api/panes/:pane response
#[derive(Debug, Serialize)]
pub struct PaneResponse {
    pub pane: PaneKind,
    pub busy: bool,
    pub selector: String,
    pub batch_id: Option<Uuid>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Size of the unfiltered result set
    pub total: usize,
    /// Results matching the selector
    pub results: Vec<ClassificationResult>,
    /// Distribution over the unfiltered result set
    pub stats: Vec<CategoryCount>,
    pub last_error: Option<String>,
}

fn parse_pane(name: &str) -> ApiResult<PaneKind> {
    PaneKind::parse(name).ok_or_else(|| ApiError::NotFound(format!("Unknown pane: {}", name)))
}

/// GET /api/panes/:pane
pub async fn get_pane(
    State(state): State<AppState>,
    Path(pane): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<PaneResponse>> {
    let kind = parse_pane(&pane)?;
    let pane = state.workspace.pane(kind);
    let snapshot = pane.snapshot().await;

    Ok(Json(PaneResponse {
        pane: kind,
        busy: pane.is_busy(),
        batch_id: snapshot.batch_id,
        completed_at: snapshot.completed_at,
        total: snapshot.results.len(),
        results: snapshot.filtered(&query.category),
        stats: snapshot.stats(),
        last_error: snapshot.last_error,
        selector: query.category,
    }))
}

/// GET /api/panes/:pane/export
///
/// CSV of the results matching the selector, as a file download.
pub async fn export_pane(
    State(state): State<AppState>,
    Path(pane): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<impl IntoResponse> {
    let kind = parse_pane(&pane)?;
    let snapshot = state.workspace.pane(kind).snapshot().await;
    let rows = snapshot.filtered(&query.category);

    let body = export::to_csv_string(&rows)
        .map_err(|e| ApiError::Internal(format!("CSV export failed: {}", e)))?;

    tracing::debug!(pane = %kind, selector = %query.category, rows = rows.len(), "CSV export");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_file_name(&query.category)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Build pane routes
pub fn pane_routes() -> Router<AppState> {
    Router::new()
        .route("/api/panes/:pane", get(get_pane))
        .route("/api/panes/:pane/export", get(export_pane))
}
