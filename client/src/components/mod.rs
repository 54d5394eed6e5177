//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components are presentational: they take plain values or callbacks and
//! never touch the backend. Pages own the state contexts.

pub mod chat_input;
pub mod conversation_card;
pub mod message_bubble;
