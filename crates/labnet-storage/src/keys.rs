//! The fixed set of durable slots.

use std::fmt;

/// A named top-level collection mirrored to durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    CurrentUser,
    AllUsers,
    Posts,
    SavedPosts,
    Notifications,
    ConnectionRequests,
    Conversations,
    Messages,
}

impl Collection {
    /// Every collection, in load order.
    pub const ALL: [Collection; 8] = [
        Collection::CurrentUser,
        Collection::AllUsers,
        Collection::Posts,
        Collection::SavedPosts,
        Collection::Notifications,
        Collection::ConnectionRequests,
        Collection::Conversations,
        Collection::Messages,
    ];

    /// Storage key for this collection.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::CurrentUser => "currentUser",
            Self::AllUsers => "allUsers",
            Self::Posts => "posts",
            Self::SavedPosts => "savedPosts",
            Self::Notifications => "notifications",
            Self::ConnectionRequests => "connectionRequests",
            Self::Conversations => "conversations",
            Self::Messages => "messages",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
