//! Client-side widget state.
//!
//! DESIGN
//! ======
//! State is a plain model behind a `RwSignal`, so every transition can be
//! exercised by native tests.

pub mod chat;
