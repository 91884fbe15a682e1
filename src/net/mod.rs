//! Networking for the chat exchange.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP call, `reply` normalizes whatever came back, and
//! `types` defines the wire schema.

pub mod api;
pub mod reply;
pub mod types;
