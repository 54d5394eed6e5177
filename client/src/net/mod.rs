//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the REST calls; wire types and errors come from `chatline`.

pub mod api;
