//! Single-conversation state for the chat thread.
//!
//! SYSTEM CONTEXT
//! ==============
//! Projects one conversation and its message list for the thread view.
//! User messages are inserted optimistically under a provisional id before
//! the backend answers, then either followed by the AI reply or removed
//! again by that id when the send fails.
//!
//! ORDERING
//! ========
//! Messages are kept in insertion order. The AI reply is appended only after
//! its send completes, so it always lands after the user message it answers.
//! At most one send is in flight; further sends are refused until it settles.
//!
//! STALE RESPONSES
//! ===============
//! Each load carries a [`LoadTicket`]. A completion whose ticket is no longer
//! the latest (a newer load started, possibly for another conversation) is
//! discarded. Send replies for a conversation that is no longer shown are
//! dropped the same way, as are replies whose optimistic message was
//! replaced by a reload of the same conversation: the reloaded thread
//! already carries the exchange.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use chrono::{DateTime, Utc};

use crate::error::{ApiError, StateError};
use crate::gateway::Gateway;
use crate::types::{
    Conversation, ConversationDetail, ConversationId, ConversationStatus, EndResult, Message, MessageId, SentMessage,
};

/// Client-side lifecycle of the thread view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No conversation requested yet.
    Unloaded,
    /// A fetch is in flight.
    Loading,
    /// Loaded and accepting messages.
    Active,
    /// Loaded and ended; terminal.
    Ended,
    /// The fetch failed and nothing is held.
    Failed,
}

/// Identifies one load request; see the module docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: ConversationId,
    seq: u64,
}

/// An optimistic send awaiting the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    pub conversation_id: ConversationId,
    pub provisional_id: MessageId,
    pub content: String,
}

/// Thread state for the conversation currently shown.
#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    /// Conversation the view is pointed at (last requested id).
    pub target: Option<ConversationId>,
    pub conversation: Option<Conversation>,
    pub messages: Vec<Message>,
    pub loading: bool,
    /// True while a sent message waits for the AI reply.
    pub awaiting_reply: bool,
    /// True while an end request is in flight.
    pub ending: bool,
    pub error: Option<String>,
    load_seq: u64,
}

impl ConversationState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.loading {
            return Phase::Loading;
        }
        match &self.conversation {
            Some(c) if c.status.is_active() => Phase::Active,
            Some(_) => Phase::Ended,
            None if self.error.is_some() => Phase::Failed,
            None => Phase::Unloaded,
        }
    }

    /// True when the loaded conversation is active and no reply is pending.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.awaiting_reply && self.conversation.as_ref().is_some_and(|c| c.status.is_active())
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// The id that needs fetching when the view is pointed at `id`, if any.
    /// `None` ids and the current target need nothing.
    #[must_use]
    pub fn needs_load(&self, id: Option<ConversationId>) -> Option<ConversationId> {
        id.filter(|id| self.target != Some(*id))
    }

    /// Forget the shown conversation when the view goes away. The load
    /// counter survives so completions of loads started before the release
    /// stay stale.
    pub fn release(&mut self) {
        self.target = None;
        self.conversation = None;
        self.messages.clear();
        self.loading = false;
        self.awaiting_reply = false;
        self.ending = false;
        self.error = None;
    }

    /// Start a load. Switching to a different conversation drops the held one
    /// so its messages never show under the new target.
    pub fn begin_load(&mut self, id: ConversationId) -> LoadTicket {
        if self.target != Some(id) {
            self.conversation = None;
            self.messages.clear();
            self.awaiting_reply = false;
            self.ending = false;
            self.error = None;
        }
        self.target = Some(id);
        self.loading = true;
        self.load_seq += 1;
        LoadTicket { id, seq: self.load_seq }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.seq == self.load_seq && self.target == Some(ticket.id)
    }

    /// Apply a load response. Returns `Ok(false)` when the ticket is stale and
    /// the response was discarded.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of a current load after recording it.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ConversationDetail, ApiError>,
    ) -> Result<bool, ApiError> {
        if !self.is_current(ticket) {
            tracing::debug!(id = ticket.id, "discarding stale conversation load");
            return Ok(false);
        }
        self.loading = false;
        match result {
            Ok(detail) => {
                tracing::debug!(id = ticket.id, messages = detail.messages.len(), "conversation loaded");
                self.conversation = Some(detail.conversation);
                self.messages = detail.messages;
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch a conversation and its messages, replacing the held state.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; it is also stored in `error`.
    pub async fn load(&mut self, gateway: &dyn Gateway, id: ConversationId) -> Result<(), ApiError> {
        let ticket = self.begin_load(id);
        let result = gateway.get_conversation(id).await;
        self.finish_load(ticket, result).map(|_| ())
    }

    /// Point the view at `id`, fetching only when it changed.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the triggered load.
    pub async fn retarget(&mut self, gateway: &dyn Gateway, id: Option<ConversationId>) -> Result<(), ApiError> {
        match self.needs_load(id) {
            Some(id) => self.load(gateway, id).await,
            None => Ok(()),
        }
    }

    // =========================================================================
    // SEND
    // =========================================================================

    /// Insert the optimistic user message. Blank content yields `Ok(None)`
    /// and changes nothing.
    ///
    /// # Errors
    ///
    /// Refuses without side effects when nothing is loaded, the conversation
    /// has ended, or another send is still awaiting its reply.
    pub fn begin_send(&mut self, content: &str, now: DateTime<Utc>) -> Result<Option<PendingSend>, StateError> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let conversation = self.conversation.as_ref().ok_or(StateError::NotLoaded)?;
        if !conversation.status.is_active() {
            return Err(StateError::Ended(conversation.id));
        }
        if self.awaiting_reply {
            return Err(StateError::SendInFlight);
        }

        let message = Message::pending_user(conversation.id, content, now);
        let pending = PendingSend {
            conversation_id: conversation.id,
            provisional_id: message.id.clone(),
            content: content.to_owned(),
        };
        self.messages.push(message);
        self.awaiting_reply = true;
        Ok(Some(pending))
    }

    fn holds(&self, conversation_id: ConversationId) -> bool {
        self.conversation
            .as_ref()
            .is_some_and(|c| c.id == conversation_id)
    }

    /// Append the AI reply for a pending send. Returns the appended message,
    /// or `None` when the view moved to another conversation meanwhile or a
    /// reload replaced the optimistic message.
    pub fn confirm_send(&mut self, pending: &PendingSend, reply: SentMessage, now: DateTime<Utc>) -> Option<&Message> {
        if !self.holds(pending.conversation_id) {
            tracing::debug!(id = pending.conversation_id, "dropping reply for conversation no longer shown");
            return None;
        }
        self.awaiting_reply = false;
        self.error = None;
        if !self.messages.iter().any(|m| m.id == pending.provisional_id) {
            tracing::debug!(id = pending.conversation_id, "dropping reply; thread was reloaded while sending");
            return None;
        }
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.message_count = conversation.message_count.saturating_add(2);
        }
        self.messages
            .push(reply.into_reply(pending.conversation_id, now));
        self.messages.last()
    }

    /// Remove the optimistic message of a failed send and record the error.
    pub fn rollback_send(&mut self, pending: &PendingSend, error: &ApiError) {
        self.messages
            .retain(|m| m.id != pending.provisional_id);
        if !self.holds(pending.conversation_id) {
            return;
        }
        tracing::warn!(id = pending.conversation_id, error = %error, "send failed; optimistic message removed");
        self.awaiting_reply = false;
        self.error = Some(error.to_string());
    }

    /// Send a user message and append the AI reply. Blank content is ignored
    /// and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a refusal from [`ConversationState::begin_send`], or the
    /// gateway error after the optimistic message was rolled back.
    pub async fn send(&mut self, gateway: &dyn Gateway, content: &str) -> Result<Option<Message>, StateError> {
        let Some(pending) = self.begin_send(content, Utc::now())? else {
            return Ok(None);
        };
        match gateway
            .send_message(pending.conversation_id, &pending.content)
            .await
        {
            Ok(reply) => Ok(self.confirm_send(&pending, reply, Utc::now()).cloned()),
            Err(e) => {
                self.rollback_send(&pending, &e);
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // END
    // =========================================================================

    /// Mark an end request as in flight and return the conversation id.
    ///
    /// # Errors
    ///
    /// Refuses when nothing is loaded, the conversation already ended, or
    /// another end request is still in flight.
    pub fn begin_end(&mut self) -> Result<ConversationId, StateError> {
        let conversation = self.conversation.as_ref().ok_or(StateError::NotLoaded)?;
        if !conversation.status.is_active() {
            return Err(StateError::Ended(conversation.id));
        }
        if self.ending {
            return Err(StateError::EndInFlight);
        }
        self.ending = true;
        Ok(conversation.id)
    }

    /// Apply an end response: `ended` plus summary on success, unchanged
    /// status with the error recorded on failure. `ended_at` comes from the
    /// response, or `now` when the backend omits it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after recording it.
    pub fn finish_end(
        &mut self,
        id: ConversationId,
        result: Result<EndResult, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<EndResult, ApiError> {
        if !self.holds(id) {
            return result;
        }
        self.ending = false;
        match result {
            Ok(end) => {
                tracing::info!(id, "conversation ended");
                if let Some(conversation) = self.conversation.as_mut() {
                    conversation.status = ConversationStatus::Ended;
                    conversation.summary.clone_from(&end.summary);
                    conversation.ended_at = Some(end.ended_at.unwrap_or(now));
                }
                self.error = None;
                Ok(end)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// End the conversation; the backend attaches a generated summary.
    ///
    /// # Errors
    ///
    /// Returns a refusal from [`ConversationState::begin_end`] or the gateway
    /// error.
    pub async fn end(&mut self, gateway: &dyn Gateway) -> Result<EndResult, StateError> {
        let id = self.begin_end()?;
        let result = gateway.end_conversation(id).await;
        Ok(self.finish_end(id, result, Utc::now())?)
    }
}
