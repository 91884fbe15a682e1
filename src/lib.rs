//! # chat-widget
//!
//! Leptos + WASM chat widget. Posts each user message to a chat endpoint
//! (`POST /chat`, `{"message": ...}`), renders the reply in a transcript, and
//! offers the reply's follow-up suggestions as clickable chips.
//!
//! Two ways to use it:
//! - from JavaScript on an existing page: `mount_chat_widget()` binds to the
//!   page's `#chat`, `#input` and `#sendBtn` elements and returns a
//!   [`ChatWidgetHandle`];
//! - from a Leptos app: render [`components::chat_widget::ChatWidget`].
//!
//! Reply decoding (`net::reply`) and the transcript state machine
//! (`state::chat`) are browser-free and covered by native tests.

pub mod components;
pub mod config;
pub mod error;
#[cfg(feature = "hydrate")]
pub mod mount;
pub mod net;
pub mod state;
pub mod widget;

#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::*;

/// JavaScript handle to a mounted widget.
#[cfg(feature = "hydrate")]
#[wasm_bindgen]
#[derive(Debug)]
pub struct ChatWidgetHandle {
    controller: widget::ChatController,
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen]
impl ChatWidgetHandle {
    /// Send `text` as if typed; ignored when blank or while a request is in flight.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: &str) {
        self.controller.send_message(text);
    }

    /// Fill and focus the input without sending.
    #[wasm_bindgen(js_name = setExample)]
    pub fn set_example(&self, text: &str) {
        self.controller.set_example(text);
    }

    /// True while a request is in flight.
    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }
}

/// Mount onto the host page's default elements, posting to `endpoint`
/// (default `/chat`).
///
/// # Errors
///
/// Returns the mount error as a string when a required element is missing.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(js_name = mountChatWidget)]
pub fn mount_chat_widget(endpoint: Option<String>) -> Result<ChatWidgetHandle, JsValue> {
    let config = config::WidgetConfig::with_endpoint(endpoint.as_deref().unwrap_or_default());
    mount_with(config)
}

/// Mount using a JSON config (`{"endpoint": ..., "transcript_id": ...}`);
/// omitted fields take their defaults.
///
/// # Errors
///
/// Returns a string error for invalid JSON or a failed mount.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(js_name = mountChatWidgetWithConfig)]
pub fn mount_chat_widget_with_config(config_json: &str) -> Result<ChatWidgetHandle, JsValue> {
    let config = config::WidgetConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("invalid widget config: {e}")))?;
    mount_with(config)
}

#[cfg(feature = "hydrate")]
fn mount_with(config: config::WidgetConfig) -> Result<ChatWidgetHandle, JsValue> {
    init_console();
    match mount::mount(config) {
        Ok(controller) => Ok(ChatWidgetHandle { controller }),
        Err(e) => {
            log::error!("chat widget mount failed: {e}");
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}

/// Route panics and `log` records to the browser console.
#[cfg(feature = "hydrate")]
fn init_console() {
    console_error_panic_hook::set_once();
    // A second mount on the same page finds the logger already installed.
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already initialized");
    }
}
