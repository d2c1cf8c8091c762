//! Store behavior switches.

use serde::{Deserialize, Serialize};

/// Configuration consumed by [`crate::Store`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub messaging: MessagingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Count the message that opens a conversation as unread.
    ///
    /// Off by default: a new conversation starts at zero unread and only
    /// later messages increment the counter.
    #[serde(default)]
    pub count_first_message_unread: bool,
}
