//! Transcript, chip strip and in-flight gate for one widget instance.
//!
//! DESIGN
//! ======
//! All state transitions are plain methods on [`ChatState`] so they can be
//! tested without a browser. The widget holds the state in a
//! `RwSignal<ChatState>`; components only read it.
//!
//! An exchange starts with [`ChatState::try_begin`] (or
//! [`ChatState::activate_chip`]), which hands out an [`Exchange`] ticket, and
//! ends with [`ChatState::finish`], the only place the in-flight flag is
//! cleared. Every settled network call goes through `finish`, whatever the
//! outcome.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::config::{CHIP_BUSY_LABEL, THINKING_TEXT, TRANSPORT_ERROR_TEXT};
use crate::net::reply::Reply;
use crate::net::types::Recommendation;

/// Who a transcript entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    /// A server-reported error, or the fixed apology when the request
    /// itself failed.
    Error,
}

impl Role {
    /// CSS modifier used by the transcript (`message user`, `message bot`).
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Error => "bot error",
        }
    }
}

/// A single transcript entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// True only for the "Thinking..." placeholder.
    pub pending: bool,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, text: text.into(), pending: false }
    }

    fn placeholder() -> Self {
        Self { pending: true, ..Self::new(Role::Bot, THINKING_TEXT) }
    }
}

/// A clickable follow-up suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub action_query: String,
    /// Set while this chip's query is the exchange in flight.
    pub busy: bool,
}

impl Chip {
    /// Label to render: the busy label while sending, the original otherwise.
    pub fn display_label(&self) -> &str {
        if self.busy { CHIP_BUSY_LABEL } else { self.label.as_str() }
    }
}

impl From<Recommendation> for Chip {
    fn from(rec: Recommendation) -> Self {
        Self { label: rec.label, action_query: rec.action_query, busy: false }
    }
}

/// Ticket for an accepted send; hand it back to [`ChatState::finish`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// Trimmed text to post.
    pub message: String,
    placeholder_id: String,
}

/// How an exchange settled.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The server answered; the body was decoded.
    Replied(Reply),
    /// The request failed before a body was available.
    Failed,
}

impl Outcome {
    /// Decide the entry and chips that replace the placeholder.
    pub fn into_parts(self) -> (ChatMessage, Vec<Chip>) {
        match self {
            Self::Replied(reply) => {
                let role = if reply.is_error() { Role::Error } else { Role::Bot };
                (
                    ChatMessage::new(role, reply.text),
                    reply.recommendations.into_iter().map(Chip::from).collect(),
                )
            }
            Self::Failed => (ChatMessage::new(Role::Error, TRANSPORT_ERROR_TEXT), Vec::new()),
        }
    }
}

/// State for the chat widget.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub chips: Vec<Chip>,
    /// Current contents of the text input.
    pub draft: String,
    /// Bumped whenever the input should take focus.
    pub focus_seq: u64,
    in_flight: Option<String>,
}

impl ChatState {
    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Accept a send if `text` is non-blank and nothing is in flight.
    ///
    /// Appends the user entry and the placeholder and discards the current
    /// chips. Returns `None`, with no other effect, when the send is rejected.
    pub fn try_begin(&mut self, text: &str) -> Option<Exchange> {
        let exchange = self.begin(text)?;
        self.chips.clear();
        Some(exchange)
    }

    /// Send the query behind chip `index`, bypassing the input.
    ///
    /// The strip stays visible but inert while the exchange runs, with the
    /// activated chip showing the busy label.
    pub fn activate_chip(&mut self, index: usize) -> Option<Exchange> {
        if self.is_busy() {
            return None;
        }
        let query = self.chips.get(index)?.action_query.clone();
        let exchange = self.begin(&query)?;
        if let Some(chip) = self.chips.get_mut(index) {
            chip.busy = true;
        }
        Some(exchange)
    }

    /// Take the trimmed draft for sending, clearing the input.
    ///
    /// Blank drafts are left as they are; so is any draft while a request is
    /// in flight, since that send would be dropped.
    pub fn take_draft(&mut self) -> Option<String> {
        if self.is_busy() {
            return None;
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_owned();
        self.draft.clear();
        Some(text)
    }

    /// Put `text` in the input and request focus, without sending.
    pub fn set_example(&mut self, text: &str) {
        text.clone_into(&mut self.draft);
        self.focus_seq += 1;
    }

    /// Settle `exchange`: replace its placeholder, swap in the new chips, and
    /// release the in-flight flag.
    ///
    /// Returns `false` if `exchange` is not the one in flight; state is left
    /// untouched in that case.
    pub fn finish(&mut self, exchange: &Exchange, outcome: Outcome) -> bool {
        if self.in_flight.as_deref() != Some(exchange.placeholder_id.as_str()) {
            return false;
        }
        let (entry, chips) = outcome.into_parts();
        match self.messages.iter().position(|m| m.id == exchange.placeholder_id) {
            Some(index) => self.messages[index] = entry,
            None => self.messages.push(entry),
        }
        self.chips = chips;
        self.in_flight = None;
        true
    }

    fn begin(&mut self, text: &str) -> Option<Exchange> {
        let text = text.trim();
        if text.is_empty() || self.is_busy() {
            return None;
        }
        let placeholder = ChatMessage::placeholder();
        let exchange = Exchange { message: text.to_owned(), placeholder_id: placeholder.id.clone() };
        self.messages.push(ChatMessage::new(Role::User, text));
        self.messages.push(placeholder);
        self.in_flight = Some(exchange.placeholder_id.clone());
        Some(exchange)
    }
}
