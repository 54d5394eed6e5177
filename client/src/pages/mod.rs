//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it reads a state context,
//! applies the begin/finish transitions around `net::api` calls, and
//! delegates rendering details to `components`.

pub mod chat;
pub mod dashboard;
pub mod intelligence;
