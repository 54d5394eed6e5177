//! Intelligence-query session state.
//!
//! One question at a time over past conversations. The answer lives only as
//! long as the screen session does.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::{ConversationId, QueryOutcome, QueryResult};

/// Canned questions offered once an answer is shown.
pub const SUGGESTED_QUERIES: [&str; 4] = [
    "What were the main topics discussed?",
    "Can you extract key decisions?",
    "What are the action items?",
    "Summarize all completed tasks",
];

#[derive(Clone, Debug, Default)]
pub struct QueryState {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<QueryOutcome>,
}

impl QueryState {
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Load a suggested question into the input and clear the last answer.
    pub fn suggest(&mut self, text: &str) {
        self.query = text.to_owned();
        self.result = None;
    }

    /// Start a query. Blank input yields `None` and changes nothing.
    pub fn begin(&mut self, query: &str) -> Option<String> {
        if query.trim().is_empty() {
            return None;
        }
        self.query = query.to_owned();
        self.loading = true;
        self.error = None;
        Some(query.to_owned())
    }

    /// Apply a query response. A failure keeps any previous answer.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after recording it.
    pub fn finish(&mut self, query: String, result: Result<QueryResult, ApiError>) -> Result<&QueryOutcome, ApiError> {
        self.loading = false;
        match result {
            Ok(res) => {
                tracing::debug!(searched = res.searched_conversations, "intelligence query answered");
                Ok(self.result.insert(QueryOutcome {
                    query,
                    response: res.response,
                    searched_conversations: res.searched_conversations,
                }))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ask a question, optionally scoped to specific conversations. Blank
    /// input yields `Ok(None)` without a request.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; it is also stored in `error`.
    pub async fn run(
        &mut self,
        gateway: &dyn Gateway,
        query: &str,
        conversation_ids: Option<&[ConversationId]>,
    ) -> Result<Option<QueryOutcome>, ApiError> {
        let Some(query) = self.begin(query) else {
            return Ok(None);
        };
        let result = gateway.query(&query, conversation_ids).await;
        self.finish(query, result).map(|outcome| Some(outcome.clone()))
    }
}
