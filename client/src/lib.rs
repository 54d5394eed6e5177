//! # client
//!
//! Leptos + WASM frontend for Chatline.
//!
//! Renders the conversation list, the chat thread and the intelligence query
//! screen on top of the state components in `chatline::state`. Backend calls
//! go through `net::api` (`gloo-net`) in the browser build.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

/// Browser entry point: logging, panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
