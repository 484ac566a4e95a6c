//! Classification result models

use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// One classified comment as returned by the classification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Comment text as echoed back by the service
    pub original_text: String,
    /// Assigned category (may be outside the registry)
    pub category: Category,
    /// Suggested reply; non-conversational outcomes carry a bracketed tag
    #[serde(default)]
    pub reply: String,
}

impl ClassificationResult {
    pub fn new(
        original_text: impl Into<String>,
        category: impl Into<Category>,
        reply: impl Into<String>,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            category: category.into(),
            reply: reply.into(),
        }
    }

    /// Fill an empty reply from the registry's fallback template
    ///
    /// Unrecognized categories have no template and keep the empty reply.
    pub fn with_fallback_reply(mut self) -> Self {
        if self.reply.trim().is_empty() {
            if let Some(def) = self.category.definition() {
                self.reply = def.fallback_reply.to_string();
            }
        }
        self
    }
}

/// Number of results that fell into one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category literal (registered id or unrecognized value)
    pub category: String,
    pub count: usize,
}
