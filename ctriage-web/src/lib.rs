//! ctriage-web library interface
//!
//! Exposes the pipeline, services and HTTP router for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::pipeline::Workspace;
use crate::services::CommentClassifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Single-comment and batch panes
    pub workspace: Arc<Workspace>,
    /// Classification backend
    pub classifier: Arc<dyn CommentClassifier>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last classification failure, for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn CommentClassifier>) -> Self {
        Self {
            workspace: Arc::new(Workspace::new()),
            classifier,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::classify_routes())
        .merge(api::pane_routes())
        .merge(api::category_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
