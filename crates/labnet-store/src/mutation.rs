//! The mutation handle.
//!
//! A [`Mutation`] borrows the store's state for the duration of one batch
//! of operations and records which collections they touched. The store
//! flushes those collections once the batch is over, so several
//! operations in a row produce one consistent snapshot per collection.
//!
//! The operations themselves live in `ops/`, one `impl Mutation` block per
//! area. Every operation is total: a target id that does not exist makes
//! it a no-op, reported through its return value and nothing else.

use chrono::{DateTime, Utc};

use labnet_core::{Notification, NotificationKind, Snapshot, User};
use labnet_storage::Collection;

use crate::clock::Timeline;
use crate::config::StoreConfig;
use crate::state::{AppState, Changes};

pub struct Mutation<'a> {
    pub(crate) state: &'a mut AppState,
    pub(crate) timeline: &'a mut Timeline,
    pub(crate) config: &'a StoreConfig,
    changes: Changes,
}

impl<'a> Mutation<'a> {
    pub(crate) fn new(
        state: &'a mut AppState,
        timeline: &'a mut Timeline,
        config: &'a StoreConfig,
    ) -> Self {
        Self {
            state,
            timeline,
            config,
            changes: Changes::default(),
        }
    }

    /// The state as it stands mid-batch.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &*self.state
    }

    /// Collections touched so far.
    #[must_use]
    pub fn changes(&self) -> &Changes {
        &self.changes
    }

    pub(crate) fn into_changes(self) -> Changes {
        self.changes
    }

    pub(crate) fn touch(&mut self, collection: Collection) {
        self.changes.insert(collection);
    }

    pub(crate) fn current_user_id(&self) -> String {
        self.state.current_user.id.clone()
    }

    /// Snapshot of the current user, for embedding in a new entity.
    pub(crate) fn me(&self) -> Snapshot<User> {
        Snapshot::capture(&self.state.current_user)
    }

    /// Prepend an unread notification triggered by the current user.
    pub(crate) fn notify(
        &mut self,
        id: String,
        kind: NotificationKind,
        post_id: Option<String>,
        message: &str,
        timestamp: DateTime<Utc>,
    ) {
        let notification = Notification {
            id,
            kind,
            from: self.me(),
            post_id,
            message: message.to_string(),
            timestamp,
            read: false,
        };
        self.state.notifications.insert(0, notification);
        self.touch(Collection::Notifications);
    }
}
