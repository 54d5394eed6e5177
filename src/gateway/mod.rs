//! Backend gateway: one async operation per REST capability.
//!
//! DESIGN
//! ======
//! State components depend on the [`Gateway`] trait rather than a concrete
//! HTTP client, so the same bookkeeping runs against `HttpGateway` in
//! production and scripted doubles in tests. The gateway is stateless: no
//! caching, no deduplication, no retries. Non-success statuses and transport
//! failures both surface as a single [`ApiError`].

pub mod endpoints;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

use crate::error::ApiError;
use crate::types::{Conversation, ConversationDetail, ConversationId, EndResult, QueryResult, SentMessage};

/// REST operations exposed by the chat backend.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /conversations`, newest first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError>;

    /// `GET /conversations/{id}` with embedded messages.
    async fn get_conversation(&self, id: ConversationId) -> Result<ConversationDetail, ApiError>;

    /// `POST /conversations`.
    async fn create_conversation(&self, title: &str) -> Result<Conversation, ApiError>;

    /// `POST /conversations/{id}/end`; the backend generates the summary.
    async fn end_conversation(&self, id: ConversationId) -> Result<EndResult, ApiError>;

    /// `POST /conversations/{id}/messages` as the user; returns the AI reply.
    async fn send_message(&self, id: ConversationId, content: &str) -> Result<SentMessage, ApiError>;

    /// `POST /query`. `None` lets the backend pick its default scope.
    async fn query(&self, query: &str, conversation_ids: Option<&[ConversationId]>) -> Result<QueryResult, ApiError>;
}
