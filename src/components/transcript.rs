//! Transcript entries.

use leptos::prelude::*;

use crate::state::chat::ChatMessage;

/// Renders one `div.message` per transcript entry, in send order.
///
/// Placeholder replacement swaps in an entry with a fresh id, so the keyed
/// list re-renders that slot instead of patching its text.
#[component]
pub fn Transcript(messages: Memo<Vec<ChatMessage>>) -> impl IntoView {
    view! {
        <For
            each=move || messages.get()
            key=|message| message.id.clone()
            children=move |message| {
                let class = format!("message {}", message.role.css_class());
                view! {
                    <div class=class class:thinking=message.pending>
                        {message.text}
                    </div>
                }
            }
        />
    }
}
