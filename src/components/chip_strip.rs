//! Recommendation chips.

use leptos::prelude::*;

use crate::widget::ChatController;

/// One button per chip. All chips are disabled while a request is in flight;
/// the one that started it shows the busy label.
#[component]
pub fn ChipStrip(controller: ChatController) -> impl IntoView {
    let chips = controller.chips();
    let busy = controller.busy();

    move || {
        chips
            .get()
            .into_iter()
            .enumerate()
            .map(|(index, chip)| {
                let label = chip.display_label().to_owned();
                view! {
                    <button
                        type="button"
                        class="rec-chip"
                        class:rec-chip--busy=chip.busy
                        title=chip.action_query
                        disabled=move || busy.get()
                        on:click=move |_| controller.activate_chip(index)
                    >
                        {label}
                    </button>
                }
            })
            .collect::<Vec<_>>()
    }
}
