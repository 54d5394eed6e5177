//! # chatline
//!
//! Client-side core for the Chatline conversational-AI product.
//!
//! This crate holds the wire types, the backend gateway (an async trait plus
//! the `reqwest` implementation), and the state components the UI drives:
//! the conversation list, a single conversation thread with optimistic sends,
//! and the intelligence query session. The Leptos frontend in `client/`
//! renders these states and reuses the pure transition methods around its own
//! browser HTTP calls.

pub mod config;
pub mod error;
pub mod gateway;
pub mod state;
pub mod types;

pub use config::GatewayConfig;
pub use error::{ApiError, StateError};
#[cfg(not(target_arch = "wasm32"))]
pub use gateway::http::HttpGateway;
pub use gateway::Gateway;
