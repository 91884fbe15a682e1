//! Self-contained chat widget for Leptos hosts.

use leptos::prelude::*;

use super::chip_strip::ChipStrip;
use super::input_row::InputRow;
use super::transcript::Transcript;
use crate::config::WidgetConfig;
use crate::widget::ChatController;

/// Transcript, chip strip and input row, rendered with the configured ids.
///
/// Pass a `controller` to keep a handle for `set_example` or programmatic
/// sends; otherwise one is created from `config` (or the defaults).
#[component]
pub fn ChatWidget(
    #[prop(optional)] config: Option<WidgetConfig>,
    #[prop(optional)] controller: Option<ChatController>,
) -> impl IntoView {
    let controller = controller.unwrap_or_else(|| ChatController::new(config.unwrap_or_default()));
    let config = controller.config();
    let messages = controller.messages();
    let transcript_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        messages.track();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = transcript_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="chat-widget">
            <div id=config.transcript_id class="chat" node_ref=transcript_ref aria-live="polite">
                <Transcript messages=messages />
            </div>
            <div id=config.chips_id class="recommendations">
                <ChipStrip controller=controller />
            </div>
            <InputRow controller=controller input_id=config.input_id send_id=config.send_id />
        </div>
    }
}
