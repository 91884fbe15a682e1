//! Widget configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The widget talks to exactly one endpoint and binds to four host elements.
//! Defaults match the original host page (`#chat`, `#input`, `#sendBtn`,
//! `#recommendations`) so a bare `mount_chat_widget()` needs no arguments.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Placeholder text shown in the bot slot while a request is in flight.
pub const THINKING_TEXT: &str = "Thinking...";

/// Substituted when the server's reply resolves to blank text.
pub const EMPTY_REPLY_TEXT: &str = "No response from assistant.";

/// Shown in place of a reply when the request itself fails.
pub const TRANSPORT_ERROR_TEXT: &str = "Sorry, error contacting server. Check server logs.";

/// Transient label on a chip whose query is being sent.
pub const CHIP_BUSY_LABEL: &str = "Sending...";

/// Maximum number of recommendation chips rendered per reply.
pub const MAX_CHIPS: usize = 6;

/// Endpoint and host-page bindings for one widget instance.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// URL the widget posts `{"message": ...}` to.
    pub endpoint: String,
    /// Id of the scrollable transcript container.
    pub transcript_id: String,
    /// Id of the text input.
    pub input_id: String,
    /// Id of the send trigger.
    pub send_id: String,
    /// Id of the chip container; created after the transcript if missing.
    pub chips_id: String,
    /// Cap on rendered chips.
    pub max_chips: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: "/chat".to_owned(),
            transcript_id: "chat".to_owned(),
            input_id: "input".to_owned(),
            send_id: "sendBtn".to_owned(),
            chips_id: "recommendations".to_owned(),
            max_chips: MAX_CHIPS,
        }
    }
}

impl WidgetConfig {
    /// Default config pointed at a different endpoint. Blank input keeps `/chat`.
    pub fn with_endpoint(endpoint: &str) -> Self {
        let mut config = Self::default();
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            endpoint.clone_into(&mut config.endpoint);
        }
        config
    }

    /// Parse a JSON config; omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the serde error when `json` is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
