//! Wire schema shared by the gateway, state components, and UI.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON so the same structs decode REST
//! responses and feed the views. Optional/defaulted fields absorb the small
//! differences between endpoints (list rows carry `message_count`, send
//! replies may omit `id`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Backend-assigned conversation identifier.
pub type ConversationId = i64;

// =============================================================================
// CONVERSATION
// =============================================================================

/// Lifecycle status of a conversation. `Ended` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Active,
    Ended,
}

impl ConversationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A conversation summary row as returned by list/create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub status: ConversationStatus,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_count: u32,
}

impl Conversation {
    /// Case-insensitive title match. `needle` must already be lowercased.
    #[must_use]
    pub fn title_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(needle)
    }
}

/// A conversation with its full message history (`GET /conversations/{id}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Response of `POST /conversations/{id}/end`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndResult {
    #[serde(default)]
    pub status: Option<ConversationStatus>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub ended_at: Option<DateTime<Utc>>,
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

/// Message identity: either assigned by the backend or generated locally for
/// an entry the backend has not acknowledged (or did not number).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Server(i64),
    Provisional(Uuid),
}

impl MessageId {
    /// Fresh locally-unique identifier.
    #[must_use]
    pub fn provisional() -> Self {
        Self::Provisional(Uuid::new_v4())
    }

    #[must_use]
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(id) => write!(f, "{id}"),
            Self::Provisional(id) => write!(f, "tmp-{id}"),
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    pub sender: Sender,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Optimistic user message shown before the backend acknowledges it.
    #[must_use]
    pub fn pending_user(conversation_id: ConversationId, content: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::provisional(),
            conversation_id: Some(conversation_id),
            sender: Sender::User,
            content: content.to_owned(),
            created_at: now,
        }
    }
}

/// Response of `POST /conversations/{id}/messages`: the AI reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentMessage {
    #[serde(default)]
    pub id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub sender: Option<Sender>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SentMessage {
    /// Build the AI message appended to the thread. A reply without an `id`
    /// gets a provisional one so list keys stay unique.
    #[must_use]
    pub fn into_reply(self, conversation_id: ConversationId, now: DateTime<Utc>) -> Message {
        Message {
            id: self.id.map_or_else(MessageId::provisional, MessageId::Server),
            conversation_id: Some(conversation_id),
            sender: Sender::Ai,
            content: self.content,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// Response of `POST /query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub response: String,
    #[serde(default)]
    pub searched_conversations: u32,
}

/// One answered intelligence query, kept only for the screen session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryOutcome {
    pub query: String,
    pub response: String,
    pub searched_conversations: u32,
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Lenient timestamp codec: RFC 3339, or naive ISO-8601 read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parse a backend timestamp.
    #[must_use]
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }
}
