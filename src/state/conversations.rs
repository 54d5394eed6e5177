//! Conversation-list state for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds every conversation the backend returned, newest first, plus a
//! free-text title filter. The filtered view is derived on each call to
//! [`ConversationsState::visible`], so it always reflects the current term
//! and collection without separate bookkeeping.

#[cfg(test)]
#[path = "conversations_test.rs"]
mod conversations_test;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::Conversation;

/// Dashboard list state.
#[derive(Clone, Debug, Default)]
pub struct ConversationsState {
    pub items: Vec<Conversation>,
    pub filter: String,
    pub loading: bool,
    pub create_pending: bool,
    pub error: Option<String>,
}

impl ConversationsState {
    /// Fresh state with its initial load already performed.
    pub async fn open(gateway: &dyn Gateway) -> Self {
        let mut state = Self::default();
        // Failure is recorded in `error`; the empty list stays displayed.
        let _ = state.load(gateway).await;
        state
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply a list response. On failure the previous collection is kept.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after recording it.
    pub fn finish_load(&mut self, result: Result<Vec<Conversation>, ApiError>) -> Result<(), ApiError> {
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "conversation list loaded");
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch all conversations, replacing the held collection.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; it is also stored in `error`.
    pub async fn load(&mut self, gateway: &dyn Gateway) -> Result<(), ApiError> {
        self.begin_load();
        let result = gateway.list_conversations().await;
        self.finish_load(result)
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Validate a title and mark a create as pending. Returns the trimmed
    /// title to submit, or `None` when it is blank (nothing changes).
    pub fn begin_create(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.create_pending = true;
        Some(title.to_owned())
    }

    /// Apply a create response, prepending the new conversation.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after recording it.
    pub fn finish_create(&mut self, result: Result<Conversation, ApiError>) -> Result<Conversation, ApiError> {
        self.create_pending = false;
        match result {
            Ok(conversation) => {
                tracing::info!(id = conversation.id, title = %conversation.title, "conversation created");
                self.items.retain(|c| c.id != conversation.id);
                self.items.insert(0, conversation.clone());
                Ok(conversation)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a conversation. Blank titles are ignored without a request and
    /// yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; it is also stored in `error`.
    pub async fn create(&mut self, gateway: &dyn Gateway, title: &str) -> Result<Option<Conversation>, ApiError> {
        let Some(title) = self.begin_create(title) else {
            return Ok(None);
        };
        let result = gateway.create_conversation(&title).await;
        self.finish_create(result).map(Some)
    }

    // =========================================================================
    // FILTER
    // =========================================================================

    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    /// Conversations whose title contains the filter term, ignoring case.
    #[must_use]
    pub fn visible(&self) -> Vec<&Conversation> {
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|c| c.title_contains(&needle))
            .collect()
    }
}
