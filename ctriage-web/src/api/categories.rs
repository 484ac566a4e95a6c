//! Category registry endpoint

use axum::{routing::get, Json, Router};
use ctriage_common::categories::{CategoryDefinition, REGISTRY};

use crate::AppState;

/// GET /api/categories
///
/// Registered categories in display order (id, label, description).
pub async fn list_categories() -> Json<&'static [CategoryDefinition]> {
    Json(&REGISTRY[..])
}

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/api/categories", get(list_categories))
}
