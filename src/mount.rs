//! Binding the widget to an existing host page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page owns the transcript container, the text input and the send
//! trigger; it may also provide the chip container. This module looks them
//! up by id, renders the transcript and chips into the page's containers,
//! and wires the page's input and button to a [`ChatController`].
//!
//! The listeners and mounted views live as long as the page, so they are
//! leaked deliberately (`forget`) rather than unmounted.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::{Closure, WasmClosure};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::components::chip_strip::ChipStrip;
use crate::components::transcript::Transcript;
use crate::config::WidgetConfig;
use crate::error::ChatError;
use crate::state::chat::ChatMessage;
use crate::widget::ChatController;

/// Mount a widget onto the host page described by `config`.
///
/// # Errors
///
/// Returns [`ChatError::Unavailable`] without a document,
/// [`ChatError::MissingElement`] if the transcript, input or send trigger is
/// absent (or the input is not an `<input>`), and [`ChatError::Dom`] if the
/// chip container or a listener cannot be attached.
pub fn mount(config: WidgetConfig) -> Result<ChatController, ChatError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ChatError::Unavailable)?;

    let transcript = html_element(&document, &config.transcript_id)?;
    let input = html_element(&document, &config.input_id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| ChatError::MissingElement(config.input_id.clone()))?;
    let send = html_element(&document, &config.send_id)?;
    let chips = chip_container(&document, &transcript, &config.chips_id)?;

    let controller = ChatController::new(config);

    let transcript_for_view = transcript.clone();
    let input_for_view = input.clone();
    leptos::mount::mount_to(transcript, move || {
        let messages = controller.messages();
        sync_transcript_scroll(transcript_for_view, messages);
        sync_input(input_for_view, controller);
        view! { <Transcript messages=messages /> }
    })
    .forget();
    leptos::mount::mount_to(chips, move || view! { <ChipStrip controller=controller /> }).forget();

    bind_input_events(&input, controller)?;
    bind_send(&send, controller)?;

    leptos::logging::log!("chat widget mounted on #{}", controller.config().transcript_id);
    Ok(controller)
}

fn html_element(document: &Document, id: &str) -> Result<HtmlElement, ChatError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| ChatError::MissingElement(id.to_owned()))?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| ChatError::MissingElement(id.to_owned()))
}

/// Find the chip container, or create it directly after the transcript.
fn chip_container(document: &Document, transcript: &HtmlElement, id: &str) -> Result<HtmlElement, ChatError> {
    if let Ok(existing) = html_element(document, id) {
        return Ok(existing);
    }
    let created = document
        .create_element("div")
        .map_err(|e| ChatError::Dom(format!("creating #{id}: {e:?}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ChatError::MissingElement(id.to_owned()))?;
    created.set_id(id);
    created.set_class_name("recommendations");
    transcript
        .after_with_node_1(&created)
        .map_err(|e| ChatError::Dom(format!("inserting #{id}: {e:?}")))?;
    Ok(created)
}

/// Keep the host transcript scrolled to the newest entry.
fn sync_transcript_scroll(transcript: HtmlElement, messages: Memo<Vec<ChatMessage>>) {
    Effect::new(move || {
        messages.track();
        transcript.set_scroll_top(transcript.scroll_height());
    });
}

/// Push draft changes (clears, examples) into the host input and honour
/// focus requests.
fn sync_input(input: HtmlInputElement, controller: ChatController) {
    let state = controller.state();
    let focus_requests = controller.focus_requests();
    let draft = Memo::new(move |_| state.with(|s| s.draft.clone()));
    let draft_input = input.clone();
    Effect::new(move || {
        let value = draft.get();
        if draft_input.value() != value {
            draft_input.set_value(&value);
        }
    });
    Effect::new(move || {
        if focus_requests.get() == 0 {
            return;
        }
        if let Err(e) = input.focus() {
            leptos::logging::warn!("input focus failed: {e:?}");
        }
    });
}

fn bind_input_events(input: &HtmlInputElement, controller: ChatController) -> Result<(), ChatError> {
    let state = controller.state();
    let source = input.clone();
    let on_input = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        let value = source.value();
        state.update(|s| s.draft = value);
    });
    listen(input, "input", on_input)?;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            controller.submit_draft();
        }
    });
    listen(input, "keydown", on_keydown)
}

fn bind_send(send: &HtmlElement, controller: ChatController) -> Result<(), ChatError> {
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        controller.submit_draft();
    });
    listen(send, "click", on_click)
}

fn listen<T: ?Sized + WasmClosure>(target: &web_sys::EventTarget, event: &str, cb: Closure<T>) -> Result<(), ChatError> {
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| ChatError::Dom(format!("attaching `{event}` listener: {e:?}")))?;
    cb.forget();
    Ok(())
}
