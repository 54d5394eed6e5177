//! `reqwest`-backed gateway for native callers.
//!
//! Thin HTTP wrapper over the backend routes. Status handling and body
//! decoding are shared with the browser client via
//! [`endpoints::decode_response`].

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Gateway;
use super::endpoints::{
    self, CONVERSATIONS_PATH, CreateConversationBody, QUERY_PATH, QueryBody, SendMessageBody, decode_response,
};
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::types::{Conversation, ConversationDetail, ConversationId, EndResult, QueryResult, SentMessage};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    api_base: String,
}

impl HttpGateway {
    /// Build a gateway from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &GatewayConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, api_base: config.api_base() })
    }

    /// Build a gateway from `CHATLINE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, ApiError> {
        let config = GatewayConfig::from_env().map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Self::new(&config)
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = endpoints::join(&self.api_base, path);
        tracing::debug!(method = "GET", %url, "gateway request");
        let response = self.http.get(&url).send().await;
        read_response(response, "GET", path).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError> {
        let url = endpoints::join(&self.api_base, path);
        tracing::debug!(method = "POST", %url, "gateway request");
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        read_response(request.send().await, "POST", path).await
    }
}

async fn read_response<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
    method: &str,
    path: &str,
) -> Result<T, ApiError> {
    let result = match response {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(text) => decode_response(status, &text),
                Err(e) => Err(ApiError::Request(e.to_string())),
            }
        }
        Err(e) => Err(ApiError::Request(e.to_string())),
    };
    if let Err(e) = &result {
        tracing::warn!(%method, %path, error = %e, "gateway request failed");
    }
    result
}

// =============================================================================
// GATEWAY
// =============================================================================

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.get(CONVERSATIONS_PATH).await
    }

    async fn get_conversation(&self, id: ConversationId) -> Result<ConversationDetail, ApiError> {
        self.get(&endpoints::conversation_path(id)).await
    }

    async fn create_conversation(&self, title: &str) -> Result<Conversation, ApiError> {
        self.post(CONVERSATIONS_PATH, Some(&CreateConversationBody { title }))
            .await
    }

    async fn end_conversation(&self, id: ConversationId) -> Result<EndResult, ApiError> {
        self.post::<(), _>(&endpoints::end_conversation_path(id), None)
            .await
    }

    async fn send_message(&self, id: ConversationId, content: &str) -> Result<SentMessage, ApiError> {
        self.post(&endpoints::messages_path(id), Some(&SendMessageBody::user(content)))
            .await
    }

    async fn query(&self, query: &str, conversation_ids: Option<&[ConversationId]>) -> Result<QueryResult, ApiError> {
        self.post(QUERY_PATH, Some(&QueryBody { query, conversation_ids }))
            .await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
