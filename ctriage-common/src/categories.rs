//! Category registry
//!
//! The closed set of classification outcomes a comment can receive, with the
//! rule text that is sent to the classification service and the label shown
//! next to each result.
//!
//! Values returned by the service that are not in the registry are kept as
//! [`Category::Unrecognized`] rather than rejected, so they can still be
//! displayed and counted under their literal value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Selector value that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

/// Classification outcome for a single comment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Praise,
    Support,
    ConstructiveCriticism,
    HateAbuse,
    Threat,
    Emotional,
    SpamIrrelevant,
    QuestionSuggestion,
    /// Value outside the registry, preserved verbatim
    Unrecognized(String),
}

/// Registry entry for one category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryDefinition {
    /// Wire identifier (e.g. "hate_abuse")
    pub id: &'static str,
    /// Short display label
    pub label: &'static str,
    /// Rule description given to the classification service
    pub description: &'static str,
    /// Reply used when the service returns an empty one
    #[serde(skip)]
    pub fallback_reply: &'static str,
}

/// All registered categories, in display order
pub static REGISTRY: [CategoryDefinition; 8] = [
    CategoryDefinition {
        id: "praise",
        label: "Praise",
        description: "Compliments or appreciation of the content or creator \
                      (e.g. \"Amazing work!\", \"Loved the animation\").",
        fallback_reply: "Thank you so much for your positive feedback. We are glad you enjoyed it!",
    },
    CategoryDefinition {
        id: "support",
        label: "Support",
        description: "Encouragement or loyalty toward the creator without a specific \
                      compliment (e.g. \"Keep going, we're with you\").",
        fallback_reply: "We really appreciate your support. Your encouragement motivates us to keep creating.",
    },
    CategoryDefinition {
        id: "constructive_criticism",
        label: "Constructive Criticism",
        description: "Negative or critical feedback that names something specific and \
                      actionable (e.g. \"The audio was too low in the second half\").",
        fallback_reply: "Thank you for your honest feedback. We will use this to improve future content.",
    },
    CategoryDefinition {
        id: "hate_abuse",
        label: "Hate / Abuse",
        description: "Insults, harassment, slurs or purely toxic remarks with no \
                      actionable content (e.g. \"This is trash and so are you\").",
        fallback_reply: "[INTERNAL FLAG] Abusive comment flagged for moderator review. No public reply.",
    },
    CategoryDefinition {
        id: "threat",
        label: "Threat",
        description: "Threats of violence, legal action, doxxing or any harm to the \
                      creator or others (e.g. \"I will report you\", \"Watch your back\").",
        fallback_reply: "[URGENT] Potential threat escalated to the safety team for review.",
    },
    CategoryDefinition {
        id: "emotional",
        label: "Emotional",
        description: "Personal or emotional reactions, memories or feelings evoked by \
                      the content (e.g. \"This reminded me of my mom\").",
        fallback_reply: "Thank you for sharing your feelings. It means a lot that our content resonated with you.",
    },
    CategoryDefinition {
        id: "spam_irrelevant",
        label: "Spam / Irrelevant",
        description: "Promotions, links, self-advertising or text unrelated to the \
                      content (e.g. \"Follow me for followers\").",
        fallback_reply: "[AUTO-HIDDEN] Spam or irrelevant comment hidden automatically.",
    },
    CategoryDefinition {
        id: "question_suggestion",
        label: "Question / Suggestion",
        description: "Questions to the creator or requests and ideas for future content \
                      (e.g. \"Can you make one on Blender?\").",
        fallback_reply: "Thank you for your suggestion. We will definitely consider creating content on this topic.",
    },
];

impl Category {
    /// Registered categories in display order
    pub fn all() -> [Category; 8] {
        [
            Category::Praise,
            Category::Support,
            Category::ConstructiveCriticism,
            Category::HateAbuse,
            Category::Threat,
            Category::Emotional,
            Category::SpamIrrelevant,
            Category::QuestionSuggestion,
        ]
    }

    /// Parse an identifier; unknown values become [`Category::Unrecognized`]
    ///
    /// Matching is exact. The service is instructed to use the identifiers
    /// verbatim, so "Praise" is treated as a divergent value, not as praise.
    pub fn parse(id: &str) -> Self {
        match id {
            "praise" => Category::Praise,
            "support" => Category::Support,
            "constructive_criticism" => Category::ConstructiveCriticism,
            "hate_abuse" => Category::HateAbuse,
            "threat" => Category::Threat,
            "emotional" => Category::Emotional,
            "spam_irrelevant" => Category::SpamIrrelevant,
            "question_suggestion" => Category::QuestionSuggestion,
            other => Category::Unrecognized(other.to_string()),
        }
    }

    /// Wire identifier (the literal value for unrecognized categories)
    pub fn as_str(&self) -> &str {
        match self {
            Category::Unrecognized(raw) => raw.as_str(),
            registered => registered.index().map(|i| REGISTRY[i].id).unwrap_or_default(),
        }
    }

    /// Registry entry, if this category is registered
    pub fn definition(&self) -> Option<&'static CategoryDefinition> {
        self.index().map(|i| &REGISTRY[i])
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }

    /// Position in [`REGISTRY`]
    fn index(&self) -> Option<usize> {
        let index = match self {
            Category::Praise => 0,
            Category::Support => 1,
            Category::ConstructiveCriticism => 2,
            Category::HateAbuse => 3,
            Category::Threat => 4,
            Category::Emotional => 5,
            Category::SpamIrrelevant => 6,
            Category::QuestionSuggestion => 7,
            Category::Unrecognized(_) => return None,
        };
        Some(index)
    }
}

/// Look up a registry entry by identifier
pub fn lookup(id: &str) -> Option<&'static CategoryDefinition> {
    REGISTRY.iter().find(|def| def.id == id)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(id: &str) -> Self {
        Category::parse(id)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_eight_unique_ids() {
        let mut ids: Vec<&str> = REGISTRY.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_all_matches_registry_order() {
        for (category, def) in Category::all().iter().zip(REGISTRY.iter()) {
            assert_eq!(category.as_str(), def.id);
            assert_eq!(Category::parse(def.id), *category);
        }
    }

    #[test]
    fn test_unknown_value_is_preserved() {
        let category = Category::parse("sarcasm");
        assert_eq!(category, Category::Unrecognized("sarcasm".to_string()));
        assert_eq!(category.as_str(), "sarcasm");
        assert!(!category.is_registered());
        assert!(category.definition().is_none());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(!Category::parse("Praise").is_registered());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("threat").map(|d| d.label), Some("Threat"));
        assert!(lookup("all").is_none());
    }

    #[test]
    fn test_fixed_replies_carry_tags() {
        assert!(Category::HateAbuse.definition().unwrap().fallback_reply.starts_with("[INTERNAL FLAG]"));
        assert!(Category::Threat.definition().unwrap().fallback_reply.starts_with("[URGENT]"));
        assert!(Category::SpamIrrelevant.definition().unwrap().fallback_reply.starts_with("[AUTO-HIDDEN]"));
    }

    #[test]
    fn test_serde_uses_literal_value() {
        let json = serde_json::to_string(&Category::HateAbuse).unwrap();
        assert_eq!(json, "\"hate_abuse\"");

        let parsed: Category = serde_json::from_str("\"off_topic\"").unwrap();
        assert_eq!(parsed.as_str(), "off_topic");
    }
}
