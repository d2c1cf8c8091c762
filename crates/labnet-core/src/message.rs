//! Direct messages and the conversations that group them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deterministic conversation id for an unordered pair of users: the two
/// ids sorted lexicographically and joined with `-`.
#[must_use]
pub fn conversation_id(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}-{b}")
    } else {
        format!("{b}-{a}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub from: String,
    pub to: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// At most one per unordered participant pair; `id` is
/// [`conversation_id`] of the participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participants: [String; 2],
    pub last_message: Message,
    #[serde(default)]
    pub unread_count: u32,
}

impl Conversation {
    /// The participant that is not `user_id`.
    #[must_use]
    pub fn other_participant(&self, user_id: &str) -> &str {
        if self.participants[0] == user_id {
            &self.participants[1]
        } else {
            &self.participants[0]
        }
    }
}
