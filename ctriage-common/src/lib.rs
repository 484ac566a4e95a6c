//! # Comment Triage Common Library
//!
//! Shared code for the comment triage service and its command line:
//! - Category registry (the closed set of classification outcomes)
//! - Classification result and category count models
//! - Bootstrap configuration loading
//! - Common error type

pub mod categories;
pub mod config;
pub mod error;
pub mod models;

pub use categories::Category;
pub use error::{Error, Result};
pub use models::{CategoryCount, ClassificationResult};
