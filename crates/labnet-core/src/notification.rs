//! Notifications, created as side effects of other mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;
use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
    Share,
    Connection,
    Citation,
    JobMatch,
}

/// Something that happened to the current user's content or network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Who triggered it, as they were at that moment.
    pub from: Snapshot<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Only ever flips from `false` to `true`.
    #[serde(default)]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_match_uses_snake_case() {
        let json = serde_json::to_string(&NotificationKind::JobMatch).unwrap();
        assert_eq!(json, "\"job_match\"");
        let back: NotificationKind = serde_json::from_str("\"connection\"").unwrap();
        assert_eq!(back, NotificationKind::Connection);
    }
}
