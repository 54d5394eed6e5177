//! REST helpers for the chat backend.
//!
//! Browser (csr): real HTTP calls via `gloo-net`, sharing paths, bodies and
//! response decoding with the native gateway through
//! `chatline::gateway::endpoints`.
//! Native builds (tests): stubs returning an error since these endpoints are
//! only reachable from the browser build.
//!
//! ERROR HANDLING
//! ==============
//! Every call yields `Result<_, ApiError>`; callers feed it straight into the
//! state transition methods, which record the message for display.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use chatline::ApiError;
#[cfg(any(test, feature = "csr"))]
use chatline::GatewayConfig;
#[cfg(feature = "csr")]
use chatline::gateway::endpoints::{self, CreateConversationBody, QueryBody, SendMessageBody};
use chatline::types::{Conversation, ConversationDetail, ConversationId, EndResult, QueryResult, SentMessage};

/// API root for a build-time origin override, e.g. `http://localhost:8000/api`.
/// Missing or invalid values fall back to the local development origin.
#[cfg(any(test, feature = "csr"))]
fn api_base_from(origin: Option<&str>) -> String {
    origin
        .and_then(|raw| GatewayConfig::with_base_url(raw).ok())
        .unwrap_or_default()
        .api_base()
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Request("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
fn url(path: &str) -> String {
    endpoints::join(&api_base_from(option_env!("CHATLINE_API_URL")), path)
}

#[cfg(feature = "csr")]
async fn read<T: serde::de::DeserializeOwned>(
    response: Result<gloo_net::http::Response, gloo_net::Error>,
    method: &str,
    path: &str,
) -> Result<T, ApiError> {
    let result = match response {
        Ok(response) => {
            let status = response.status();
            match response.text().await {
                Ok(body) => endpoints::decode_response(status, &body),
                Err(e) => Err(ApiError::Request(e.to_string())),
            }
        }
        Err(e) => Err(ApiError::Request(e.to_string())),
    };
    if let Err(e) = &result {
        log::warn!("{method} {path} failed: {e}");
    }
    result
}

#[cfg(feature = "csr")]
async fn get<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = gloo_net::http::Request::get(&url(path)).send().await;
    read(response, "GET", path).await
}

#[cfg(feature = "csr")]
async fn post<B: serde::Serialize, T: serde::de::DeserializeOwned>(path: &str, body: Option<&B>) -> Result<T, ApiError> {
    let builder = gloo_net::http::Request::post(&url(path));
    let response = match body {
        Some(body) => {
            builder
                .json(body)
                .map_err(|e| ApiError::Request(e.to_string()))?
                .send()
                .await
        }
        None => builder.send().await,
    };
    read(response, "POST", path).await
}

/// List all conversations, newest first.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn list_conversations() -> Result<Vec<Conversation>, ApiError> {
    #[cfg(feature = "csr")]
    {
        get(endpoints::CONVERSATIONS_PATH).await
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Fetch one conversation with its messages.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn get_conversation(id: ConversationId) -> Result<ConversationDetail, ApiError> {
    #[cfg(feature = "csr")]
    {
        get(&endpoints::conversation_path(id)).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
        Err(unavailable())
    }
}

/// Create a conversation with an already-trimmed title.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn create_conversation(title: &str) -> Result<Conversation, ApiError> {
    #[cfg(feature = "csr")]
    {
        post(endpoints::CONVERSATIONS_PATH, Some(&CreateConversationBody { title })).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = title;
        Err(unavailable())
    }
}

/// End a conversation; the backend returns the generated summary.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn end_conversation(id: ConversationId) -> Result<EndResult, ApiError> {
    #[cfg(feature = "csr")]
    {
        post::<(), _>(&endpoints::end_conversation_path(id), None).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
        Err(unavailable())
    }
}

/// Post a user message and return the AI reply.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn send_message(id: ConversationId, content: &str) -> Result<SentMessage, ApiError> {
    #[cfg(feature = "csr")]
    {
        post(&endpoints::messages_path(id), Some(&SendMessageBody::user(content))).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (id, content);
        Err(unavailable())
    }
}

/// Ask a question over past conversations.
///
/// # Errors
///
/// Returns the transport, status or decode failure.
pub async fn query(query: &str, conversation_ids: Option<&[ConversationId]>) -> Result<QueryResult, ApiError> {
    #[cfg(feature = "csr")]
    {
        post(endpoints::QUERY_PATH, Some(&QueryBody { query, conversation_ids })).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (query, conversation_ids);
        Err(unavailable())
    }
}
