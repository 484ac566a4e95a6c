//! Classification request construction
//!
//! Builds the instructions and the response schema sent with every batch.
//! The schema restricts `category` to the registered identifiers, but the
//! parser still tolerates other values.

use ctriage_common::categories::REGISTRY;
use serde_json::{json, Value};

/// System instructions: category rules, disambiguation and reply policy
pub fn build_instructions() -> String {
    let mut text = String::from(
        "You triage audience comments left on a creator's content. \
         Classify every comment into exactly one category and suggest a reply.\n\n\
         Categories (use the identifier verbatim):\n",
    );
    for def in REGISTRY.iter() {
        text.push_str(&format!("- {}: {}\n", def.id, def.description));
    }

    text.push_str(
        "\nDisambiguation:\n\
         - constructive_criticism vs hate_abuse: if a negative comment points at anything \
         specific that could be improved (audio, pacing, length, accuracy, visuals), it is \
         constructive_criticism even when the tone is harsh. Use hate_abuse only when the \
         comment is purely insulting or toxic and contains nothing actionable.\n\
         - Threats of harm or legal action are threat even when they also insult.\n\n\
         Reply policy:\n\
         - praise, support, emotional, question_suggestion, constructive_criticism: a short, \
         warm, personal acknowledgement in the commenter's language.\n\
         - hate_abuse: reply exactly \"[INTERNAL FLAG] Abusive comment flagged for moderator \
         review. No public reply.\"\n\
         - threat: reply exactly \"[URGENT] Potential threat escalated to the safety team for \
         review.\"\n\
         - spam_irrelevant: reply exactly \"[AUTO-HIDDEN] Spam or irrelevant comment hidden \
         automatically.\"\n\n\
         Input lines may be raw CSV rows (quotes, ids, timestamps). Put only the actual \
         comment text in original_text. Return exactly one object per input comment, in the \
         same order, and never merge, split or skip comments.\n",
    );
    text
}

/// User content: the batch as a numbered JSON array
pub fn build_batch_content(comments: &[String]) -> String {
    let numbered: Vec<Value> = comments
        .iter()
        .enumerate()
        .map(|(i, comment)| json!({ "index": i, "comment": comment }))
        .collect();
    format!(
        "Classify these {} comments:\n{}",
        comments.len(),
        Value::Array(numbered)
    )
}

/// Response schema: ordered array of {original_text, category, reply}
pub fn response_schema() -> Value {
    let ids: Vec<&str> = REGISTRY.iter().map(|def| def.id).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "original_text": { "type": "STRING" },
                "category": { "type": "STRING", "enum": ids },
                "reply": { "type": "STRING" }
            },
            "required": ["original_text", "category", "reply"],
            "propertyOrdering": ["original_text", "category", "reply"]
        }
    })
}
