//! Message input and send trigger.

use leptos::prelude::*;

use crate::widget::ChatController;

/// Text input bound to the draft plus a send button.
///
/// Enter submits; Shift+Enter does not. The input takes focus whenever
/// `set_example` bumps the focus sequence.
#[component]
pub fn InputRow(
    controller: ChatController,
    /// Id given to the text input.
    input_id: String,
    /// Id given to the send button.
    send_id: String,
) -> impl IntoView {
    let state = controller.state();
    let focus_requests = controller.focus_requests();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move || {
        if focus_requests.get() == 0 {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            if let Some(input_el) = input_ref.get() {
                if let Err(e) = input_el.focus() {
                    leptos::logging::warn!("input focus failed: {e:?}");
                }
            }
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            controller.submit_draft();
        }
    };

    view! {
        <div class="chat-input-row">
            <input
                id=input_id
                class="chat-input"
                type="text"
                placeholder="Type a message..."
                autocomplete="off"
                node_ref=input_ref
                prop:value=move || state.with(|s| s.draft.clone())
                on:input=move |ev| state.update(|s| s.draft = event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button
                id=send_id
                type="button"
                class="btn btn--primary chat-send"
                on:click=move |_| controller.submit_draft()
            >
                "Send"
            </button>
        </div>
    }
}
