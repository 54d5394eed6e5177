//! Scripted gateway double and fixture builders for state tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::{
    Conversation, ConversationDetail, ConversationId, ConversationStatus, EndResult, Message, MessageId, QueryResult,
    SentMessage, Sender,
};

type Script<T> = Mutex<VecDeque<Result<T, ApiError>>>;

/// Gateway that replays queued results per operation and records each call.
/// An operation with nothing queued fails with a transport error.
#[derive(Default)]
pub struct FakeGateway {
    list: Script<Vec<Conversation>>,
    detail: Script<ConversationDetail>,
    create: Script<Conversation>,
    end: Script<EndResult>,
    send: Script<SentMessage>,
    query: Script<QueryResult>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn push_list(&self, result: Result<Vec<Conversation>, ApiError>) {
        self.list.lock().unwrap().push_back(result);
    }

    pub fn push_detail(&self, result: Result<ConversationDetail, ApiError>) {
        self.detail.lock().unwrap().push_back(result);
    }

    pub fn push_create(&self, result: Result<Conversation, ApiError>) {
        self.create.lock().unwrap().push_back(result);
    }

    pub fn push_end(&self, result: Result<EndResult, ApiError>) {
        self.end.lock().unwrap().push_back(result);
    }

    pub fn push_send(&self, result: Result<SentMessage, ApiError>) {
        self.send.lock().unwrap().push_back(result);
    }

    pub fn push_query(&self, result: Result<QueryResult, ApiError>) {
        self.query.lock().unwrap().push_back(result);
    }

    /// Calls made so far, e.g. `["list", "send 5 Hello"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(&self, script: &Script<T>, call: String) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(call);
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Request("no scripted response".into())))
    }
}

#[async_trait::async_trait]
impl Gateway for FakeGateway {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.next(&self.list, "list".into())
    }

    async fn get_conversation(&self, id: ConversationId) -> Result<ConversationDetail, ApiError> {
        self.next(&self.detail, format!("get {id}"))
    }

    async fn create_conversation(&self, title: &str) -> Result<Conversation, ApiError> {
        self.next(&self.create, format!("create {title}"))
    }

    async fn end_conversation(&self, id: ConversationId) -> Result<EndResult, ApiError> {
        self.next(&self.end, format!("end {id}"))
    }

    async fn send_message(&self, id: ConversationId, content: &str) -> Result<SentMessage, ApiError> {
        self.next(&self.send, format!("send {id} {content}"))
    }

    async fn query(&self, query: &str, conversation_ids: Option<&[ConversationId]>) -> Result<QueryResult, ApiError> {
        let scope = conversation_ids.map_or_else(|| "all".to_owned(), |ids| format!("{ids:?}"));
        self.next(&self.query, format!("query {query} {scope}"))
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn conversation(id: ConversationId, title: &str) -> Conversation {
    Conversation {
        id,
        title: title.to_owned(),
        status: ConversationStatus::Active,
        summary: None,
        created_at: fixed_time(),
        ended_at: None,
        message_count: 0,
    }
}

pub fn message(id: i64, conversation_id: ConversationId, sender: Sender, content: &str) -> Message {
    Message {
        id: MessageId::Server(id),
        conversation_id: Some(conversation_id),
        sender,
        content: content.to_owned(),
        created_at: fixed_time(),
    }
}

pub fn detail(id: ConversationId, title: &str, status: ConversationStatus, messages: Vec<Message>) -> ConversationDetail {
    let mut conversation = conversation(id, title);
    conversation.status = status;
    conversation.message_count = u32::try_from(messages.len()).unwrap();
    if status == ConversationStatus::Ended {
        conversation.summary = Some("Earlier summary.".to_owned());
    }
    ConversationDetail { conversation, messages }
}

pub fn reply(id: Option<i64>, content: &str) -> SentMessage {
    SentMessage { id, content: content.to_owned(), sender: Some(Sender::Ai), created_at: None }
}

pub fn offline() -> ApiError {
    ApiError::Request("connection refused".into())
}
