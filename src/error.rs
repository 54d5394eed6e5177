//! Error types for gateway calls and state operations.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::types::ConversationId;

/// Errors surfaced by the backend gateway. Every variant renders as a
/// human-readable message suitable for an on-screen notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, CORS).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// Build a status error, preferring the backend's `{"detail": ...}` text
    /// and falling back to the canonical reason phrase of `status`.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: status_message(status, body) }
    }

    /// HTTP status for [`ApiError::Status`], `None` for transport failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => detail.trim().to_owned(),
            Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => reason_phrase(status),
            // Validation errors carry a structured list; keep it readable.
            Some(other) => other.to_string(),
        };
    }
    if !body.is_empty() && body.len() <= 200 && !body.starts_with('<') {
        return body.to_owned();
    }
    reason_phrase(status)
}

/// Canonical reason for `status`, or a generic text for unregistered codes.
fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("request failed")
        .to_owned()
}

/// Errors returned by state operations. Gateway failures are wrapped; the
/// remaining variants are refusals that never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No conversation has been loaded yet.
    #[error("no conversation loaded")]
    NotLoaded,

    /// The conversation is ended and accepts no further changes.
    #[error("conversation {0} has ended")]
    Ended(ConversationId),

    /// A previous message is still waiting for its reply.
    #[error("a message is already awaiting a reply")]
    SendInFlight,

    /// An end request for the conversation has not settled yet.
    #[error("an end request is already in flight")]
    EndInFlight,
}

/// Errors produced while building configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected an http:// or https:// address")]
    InvalidBaseUrl(String),
}
