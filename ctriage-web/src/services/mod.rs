//! Services for comment triage
//!
//! Ingestion, the classification client, aggregation and CSV export.

pub mod aggregation;
pub mod classifier;
pub mod export;
pub mod gemini_client;
pub mod ingestion;
pub mod prompt;

pub use aggregation::{aggregate, filter};
pub use classifier::{ClassificationError, CommentClassifier};
pub use gemini_client::{GeminiClient, GeminiConfig};
pub use ingestion::{ingest_batch, ingest_single, IngestedBatch, MAX_BATCH_LINES};
