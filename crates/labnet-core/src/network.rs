//! Connection requests between researchers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;
use crate::user::User;

/// Lifecycle of a [`ConnectionRequest`]. `Accepted` and `Rejected` are
/// terminal; a pending request can also be withdrawn, which deletes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub id: String,
    pub from: Snapshot<User>,
    /// Id of the invited user.
    pub to: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: RequestStatus,
    /// Shared connections, computed once when the request was sent.
    #[serde(default)]
    pub mutual_connections: usize,
}

impl ConnectionRequest {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
