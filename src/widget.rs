//! The send flow: one accepted message, one request, one settled entry.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ChatController`] is the handle every surface (Leptos components, the
//! host-page binding, the wasm exports) drives. It owns the widget's
//! `RwSignal<ChatState>` and config; it is `Copy`, so event handlers can
//! capture it freely.
//!
//! FLOW
//! ====
//! `send_message` -> `ChatState::try_begin` (user entry + placeholder) ->
//! `spawn_local(run_exchange)` -> `ChatState::finish`. `run_exchange` cannot
//! fail, so `finish` runs for every accepted send and the in-flight flag is
//! always released once the request settles.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::net::api;
use crate::net::reply::decode_reply;
use crate::state::chat::{ChatMessage, ChatState, Chip, Exchange, Outcome};

/// Handle to one widget instance.
#[derive(Clone, Copy, Debug)]
pub struct ChatController {
    state: RwSignal<ChatState>,
    config: StoredValue<WidgetConfig>,
}

impl ChatController {
    pub fn new(config: WidgetConfig) -> Self {
        Self { state: RwSignal::new(ChatState::default()), config: StoredValue::new(config) }
    }

    /// Reactive widget state, for rendering.
    pub fn state(&self) -> RwSignal<ChatState> {
        self.state
    }

    /// Transcript entries. Readers rerun only when the entries change, not
    /// on every keystroke in the input.
    pub fn messages(&self) -> Memo<Vec<ChatMessage>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.messages.clone()))
    }

    /// Current chip strip, memoized like [`Self::messages`].
    pub fn chips(&self) -> Memo<Vec<Chip>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.chips.clone()))
    }

    /// Reactive in-flight flag.
    pub fn busy(&self) -> Memo<bool> {
        let state = self.state;
        Memo::new(move |_| state.with(ChatState::is_busy))
    }

    /// Reactive focus sequence; changes only when `set_example` asks for focus.
    pub fn focus_requests(&self) -> Memo<u64> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.focus_seq))
    }

    pub fn config(&self) -> WidgetConfig {
        self.config.get_value()
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.with_untracked(ChatState::is_busy)
    }

    /// Send `text` as if the user had typed it.
    ///
    /// Blank text, or any call while a request is in flight, is ignored.
    pub fn send_message(&self, text: &str) {
        let mut accepted = None;
        self.state.update(|s| accepted = s.try_begin(text));
        if let Some(exchange) = accepted {
            self.dispatch(exchange);
        }
    }

    /// Send whatever is in the input, clearing it.
    pub fn submit_draft(&self) {
        let mut draft = None;
        self.state.update(|s| draft = s.take_draft());
        if let Some(text) = draft {
            self.send_message(&text);
        }
    }

    /// Send the query behind chip `index`.
    pub fn activate_chip(&self, index: usize) {
        let mut accepted = None;
        self.state.update(|s| accepted = s.activate_chip(index));
        if let Some(exchange) = accepted {
            self.dispatch(exchange);
        }
    }

    /// Fill the input with `text` and focus it, without sending.
    pub fn set_example(&self, text: &str) {
        self.state.update(|s| s.set_example(text));
    }

    fn dispatch(&self, exchange: Exchange) {
        let state = self.state;
        let (endpoint, max_chips) = self.config.with_value(|c| (c.endpoint.clone(), c.max_chips));
        leptos::task::spawn_local(async move {
            let outcome = run_exchange(&endpoint, &exchange.message, max_chips).await;
            state.update(|s| {
                if !s.finish(&exchange, outcome) {
                    leptos::logging::warn!("chat exchange settled after it was replaced");
                }
            });
        });
    }
}

/// Post one message and turn whatever happens into an [`Outcome`].
///
/// Transport failures are logged here and reported as [`Outcome::Failed`];
/// they never reach the caller as errors.
pub async fn run_exchange(endpoint: &str, message: &str, max_chips: usize) -> Outcome {
    match api::post_chat(endpoint, message).await {
        Ok(raw) => Outcome::Replied(decode_reply(&raw.body, max_chips)),
        Err(e) => {
            leptos::logging::warn!("chat request failed: {e}");
            Outcome::Failed
        }
    }
}
