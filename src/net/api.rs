//! The single HTTP call the widget makes.
//!
//! Client-side (hydrate): a real `POST` via `gloo-net`.
//! Server-side / native: returns [`ChatError::Unavailable`], since the
//! exchange is only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only transport failures are errors. A non-2xx status still carries a body
//! the server meant to show (legacy servers answer `500 {"response": ...}`),
//! so the body is returned and the status is only logged.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::ChatRequest;
use crate::error::ChatError;

/// A settled HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text; decoding happens in `net::reply`.
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error(endpoint: &str, message: impl ToString) -> ChatError {
    ChatError::Transport { endpoint: endpoint.to_owned(), message: message.to_string() }
}

/// Post `message` to `endpoint` as `{"message": ...}` and return the raw reply.
///
/// # Errors
///
/// Returns [`ChatError::Transport`] if the request cannot be sent or the
/// connection fails, [`ChatError::Body`] if the body cannot be read, and
/// [`ChatError::Unavailable`] outside the browser.
pub async fn post_chat(endpoint: &str, message: &str) -> Result<RawResponse, ChatError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = ChatRequest { message };
        let resp = gloo_net::http::Request::post(endpoint)
            .json(&payload)
            .map_err(|e| ChatError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ChatError::Body(e.to_string()))?;
        let raw = RawResponse { status, body };
        if !raw.is_success() {
            leptos::logging::warn!("chat endpoint {endpoint} answered {status}");
        }
        Ok(raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _request = (endpoint, ChatRequest { message });
        Err(ChatError::Unavailable)
    }
}
