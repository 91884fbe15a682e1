//! Leptos views for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transcript` and `chip_strip` are shared by both surfaces: the
//! self-contained `<ChatWidget/>` and the host-page binding in `mount`,
//! which renders them into the page's own containers.

pub mod chat_widget;
pub mod chip_strip;
pub mod input_row;
pub mod transcript;
