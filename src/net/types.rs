//! Wire DTOs for the `/chat` exchange.
//!
//! DESIGN
//! ======
//! The request is fixed (`{"message": ...}`); the response is loosely shaped
//! and decoded from `serde_json::Value` in `net::reply`. Only the
//! recommendation entries get a typed form here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Request body posted to the chat endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    /// Trimmed user text.
    pub message: &'a str,
}

/// One recommendation entry as the server sends it.
///
/// Servers send either `{"text": ..., "action_query": ...}` objects (both
/// optional) or bare strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawRecommendation {
    /// Bare string: label and query are the same text.
    Plain(String),
    /// Object form; unknown fields are ignored.
    Entry {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        action_query: Option<String>,
    },
}

/// A follow-up suggestion resolved from a raw entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    /// Text shown on the chip.
    pub label: String,
    /// Text sent when the chip is activated.
    pub action_query: String,
}

impl RawRecommendation {
    /// Resolve label and query, each falling back to the other.
    ///
    /// Returns `None` when neither field carries non-blank text.
    pub fn resolve(self) -> Option<Recommendation> {
        let (text, query) = match self {
            Self::Plain(text) => (Some(text), None),
            Self::Entry { text, action_query } => (text, action_query),
        };
        let text = non_blank(text);
        let query = non_blank(query);
        let label = text.clone().or_else(|| query.clone())?;
        let action_query = query.or(text)?;
        Some(Recommendation { label, action_query })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
