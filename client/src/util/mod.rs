//! Pure helpers shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Kept free of browser APIs so they run under native `cargo test`.

pub mod format;
pub mod markdown;
