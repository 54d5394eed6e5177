//! Route paths and request bodies for the chat backend.
//!
//! Shared by `HttpGateway` and the browser client's `gloo-net` helpers so
//! both speak exactly the same wire format. Paths are relative to the API
//! base (`{origin}/api`).

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{ConversationId, Sender};

pub const CONVERSATIONS_PATH: &str = "/conversations";
pub const QUERY_PATH: &str = "/query";

#[must_use]
pub fn conversation_path(id: ConversationId) -> String {
    format!("{CONVERSATIONS_PATH}/{id}")
}

#[must_use]
pub fn end_conversation_path(id: ConversationId) -> String {
    format!("{CONVERSATIONS_PATH}/{id}/end")
}

#[must_use]
pub fn messages_path(id: ConversationId) -> String {
    format!("{CONVERSATIONS_PATH}/{id}/messages")
}

/// Join an API base and a route path without doubling slashes.
#[must_use]
pub fn join(api_base: &str, path: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[derive(Debug, Serialize)]
pub struct CreateConversationBody<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendMessageBody<'a> {
    pub content: &'a str,
    pub sender: Sender,
}

impl<'a> SendMessageBody<'a> {
    /// Messages posted by this client are always authored by the user.
    #[must_use]
    pub fn user(content: &'a str) -> Self {
        Self { content, sender: Sender::User }
    }
}

/// `conversation_ids` serializes as `null` when unscoped.
#[derive(Debug, Serialize)]
pub struct QueryBody<'a> {
    pub query: &'a str,
    pub conversation_ids: Option<&'a [ConversationId]>,
}

/// Map a raw HTTP exchange onto the decoded resource or an [`ApiError`].
/// Any 2xx status is success.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for non-2xx statuses and
/// [`ApiError::Decode`] when a success body does not match `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
