//! Response normalization for the chat endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Servers behind `/chat` have answered in several shapes over time: a bare
//! string, `{"reply": ...}`, the legacy `{"response": ...}`, `{"error": ...}`,
//! and the legacy handler result nested one level deep
//! (`{"response": {"response": ..., "recommendations": [...]}}`). Everything
//! funnels through [`decode_reply`] into one canonical [`Reply`] before any
//! rendering happens.
//!
//! PRECEDENCE
//! ==========
//! Reply text: `reply`, then `response`, then `error` (as `"Error: ..."`),
//! then a pretty-printed dump of the whole object. Chips: `recommendations`,
//! then `recs`, then `suggestions`. A `null` field is treated as absent.

#[cfg(test)]
#[path = "reply_test.rs"]
mod reply_test;

use serde_json::{Map, Value};

use super::types::{RawRecommendation, Recommendation};
use crate::config::EMPTY_REPLY_TEXT;

const REPLY_FIELDS: [(&str, ReplySource); 2] =
    [("reply", ReplySource::Reply), ("response", ReplySource::LegacyResponse)];
const RECOMMENDATION_FIELDS: [&str; 3] = ["recommendations", "recs", "suggestions"];

/// Nested envelopes are unwrapped at most this many levels.
const MAX_ENVELOPE_DEPTH: usize = 1;

/// The response body, classified before field lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplyBody {
    /// A JSON string, or a body that is not JSON at all.
    Text(String),
    /// A JSON object.
    Envelope(Map<String, Value>),
    /// Any other JSON value (array, number, bool, null).
    Other(Value),
}

/// Where the reply text was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Text,
    Reply,
    LegacyResponse,
    Error,
    Dump,
}

/// Canonical reply ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    /// Text for the bot entry; never blank.
    pub text: String,
    /// Deduplicated, capped follow-up suggestions.
    pub recommendations: Vec<Recommendation>,
    /// Which precedence rule produced `text`.
    pub source: ReplySource,
}

impl Reply {
    /// True when the server reported an application-level error.
    pub fn is_error(&self) -> bool {
        self.source == ReplySource::Error
    }
}

/// Classify a raw response body. Unparseable text is kept verbatim.
pub fn classify_body(raw: &str) -> ReplyBody {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(text)) => ReplyBody::Text(text),
        Ok(Value::Object(map)) => ReplyBody::Envelope(map),
        Ok(other) => ReplyBody::Other(other),
        Err(_) => ReplyBody::Text(raw.to_owned()),
    }
}

/// Decode a raw response body into a [`Reply`] with at most `max_chips` chips.
pub fn decode_reply(raw: &str, max_chips: usize) -> Reply {
    normalize(classify_body(raw), max_chips)
}

/// Apply the precedence rules to an already classified body.
pub fn normalize(body: ReplyBody, max_chips: usize) -> Reply {
    let (text, source, raw_recs) = match body {
        ReplyBody::Text(text) => (text, ReplySource::Text, Vec::new()),
        ReplyBody::Other(value) => (pretty(&value), ReplySource::Dump, Vec::new()),
        ReplyBody::Envelope(map) => resolve_envelope(&map, 0),
    };

    Reply {
        text: non_blank_or_fallback(text),
        recommendations: dedupe_recommendations(raw_recs, max_chips),
        source,
    }
}

fn resolve_envelope(map: &Map<String, Value>, depth: usize) -> (String, ReplySource, Vec<Value>) {
    let own_recs = extract_recommendations(map);

    for (field, source) in REPLY_FIELDS {
        let Some(value) = present(map, field) else {
            continue;
        };
        if let Value::Object(nested) = value {
            if depth < MAX_ENVELOPE_DEPTH {
                let (text, nested_source, nested_recs) = resolve_envelope(nested, depth + 1);
                let recs = if own_recs.is_empty() { nested_recs } else { own_recs };
                let source = if nested_source == ReplySource::Error { nested_source } else { source };
                return (text, source, recs);
            }
        }
        return (value_text(value), source, own_recs);
    }

    if let Some(error) = present(map, "error") {
        return (format!("Error: {}", error_message(error)), ReplySource::Error, own_recs);
    }

    (pretty(&Value::Object(map.clone())), ReplySource::Dump, own_recs)
}

fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

/// The first present recommendation field wins, even if it is not an array.
fn extract_recommendations(map: &Map<String, Value>) -> Vec<Value> {
    RECOMMENDATION_FIELDS
        .iter()
        .find_map(|field| present(map, field))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Resolve raw entries, collapse duplicates by action query, keep first-seen order.
pub fn dedupe_recommendations(raw: Vec<Value>, max_chips: usize) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = Vec::new();
    for value in raw {
        if out.len() >= max_chips {
            break;
        }
        let Ok(entry) = serde_json::from_value::<RawRecommendation>(value) else {
            continue;
        };
        let Some(rec) = entry.resolve() else {
            continue;
        };
        if out.iter().any(|seen| seen.action_query == rec.action_query) {
            continue;
        }
        out.push(rec);
    }
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => pretty(other),
    }
}

fn error_message(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => pretty(value),
        },
        other => value_text(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn non_blank_or_fallback(text: String) -> String {
    if text.trim().is_empty() {
        EMPTY_REPLY_TEXT.to_owned()
    } else {
        text
    }
}
