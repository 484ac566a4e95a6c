//! Comment ingestion
//!
//! Turns user input into the ordered batch that is sent for classification:
//! - Single comment: trimmed-empty input is a no-op, not an error
//! - Uploaded file: line split, blank removal, header sniffing, 200-line cap
//!
//! Lines are forwarded raw (including CSV quoting); the classification
//! service is instructed to extract the comment text from noisy lines.

use serde::Serialize;

/// Upper bound on comments forwarded from one upload
pub const MAX_BATCH_LINES: usize = 200;

/// Tokens that mark the first line as a header row
const HEADER_TOKENS: [&str; 2] = ["comment", "text"];

/// Ordered comments ready for classification, with ingestion counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedBatch {
    /// Comments in upload order
    pub comments: Vec<String>,
    /// Non-blank lines found in the upload (header included)
    pub lines_read: usize,
    /// Whether the first line was dropped as a header
    pub header_dropped: bool,
    /// Lines discarded by the batch cap
    pub truncated: usize,
}

impl IngestedBatch {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }
}

/// Prepare a single typed comment
///
/// Returns `None` for empty or whitespace-only input so the caller skips
/// classification entirely. The comment itself is forwarded unmodified.
pub fn ingest_single(comment: &str) -> Option<Vec<String>> {
    if comment.trim().is_empty() {
        None
    } else {
        Some(vec![comment.to_string()])
    }
}

/// Normalize uploaded file content into a bounded batch
pub fn ingest_batch(content: &str) -> IngestedBatch {
    // str::lines handles both "\n" and "\r\n"
    let mut lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let lines_read = lines.len();

    let header_dropped = lines.first().map(|first| is_header(first)).unwrap_or(false);
    if header_dropped {
        lines.remove(0);
    }

    let truncated = lines.len().saturating_sub(MAX_BATCH_LINES);
    if truncated > 0 {
        tracing::info!(
            kept = MAX_BATCH_LINES,
            dropped = truncated,
            "Upload exceeds batch cap, extra lines dropped"
        );
        lines.truncate(MAX_BATCH_LINES);
    }

    IngestedBatch {
        comments: lines.into_iter().map(str::to_string).collect(),
        lines_read,
        header_dropped,
        truncated,
    }
}

fn is_header(line: &str) -> bool {
    let lowered = line.to_lowercase();
    HEADER_TOKENS.iter().any(|token| lowered.contains(token))
}
