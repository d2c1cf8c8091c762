//! The application state store.

use std::collections::BTreeSet;

use tracing::debug;

use labnet_core::{ConnectionRequest, Conversation, Message, Notification, Post, User};
use labnet_storage::{Collection, KeyValueStore, Persistence};

use crate::clock::{Clock, SystemClock, Timeline};
use crate::command::{Command, Outcome};
use crate::config::StoreConfig;
use crate::mutation::Mutation;
use crate::state::{AppState, Changes};

/// Owns the application state and mirrors it to a [`KeyValueStore`].
///
/// Reads go through the accessors. Writes go through [`Store::mutate`] or
/// [`Store::dispatch`]; either way each collection a batch touched is
/// saved exactly once, after the batch.
pub struct Store<B: KeyValueStore> {
    state: AppState,
    persistence: Persistence<B>,
    timeline: Timeline,
    config: StoreConfig,
}

impl<B: KeyValueStore> Store<B> {
    /// Load every collection from `backend`, seeding whatever is missing.
    pub fn open(backend: B, config: StoreConfig) -> Self {
        Self::open_with_clock(backend, config, Box::new(SystemClock))
    }

    /// Like [`Store::open`], with an explicit time source.
    pub fn open_with_clock(backend: B, config: StoreConfig, clock: Box<dyn Clock>) -> Self {
        let persistence = Persistence::new(backend);
        let mut timeline = Timeline::new(clock);
        let state = AppState::load(&persistence, timeline.now());
        if let Some(latest) = state.latest_timestamp() {
            timeline.resume_after(latest);
        }
        Self {
            state,
            persistence,
            timeline,
            config,
        }
    }

    /// Run a batch of operations, then save every collection they changed.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Mutation<'_>) -> R) -> R {
        let mut mutation = Mutation::new(&mut self.state, &mut self.timeline, &self.config);
        let result = f(&mut mutation);
        let changes = mutation.into_changes();
        self.flush(&changes);
        result
    }

    /// Apply one command.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        debug!(op = command.name(), "dispatch");
        self.mutate(|m| command.apply(m))
    }

    /// Apply `commands` in order as one batch.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<Outcome> {
        self.mutate(|m| {
            commands
                .into_iter()
                .map(|command| {
                    debug!(op = command.name(), "dispatch");
                    command.apply(m)
                })
                .collect()
        })
    }

    /// Save every collection regardless of what changed.
    pub fn persist_all(&mut self) {
        for collection in Collection::ALL {
            self.state.save_collection(&mut self.persistence, collection);
        }
    }

    fn flush(&mut self, changes: &Changes) {
        for collection in changes.iter() {
            debug!(%collection, "flush");
            self.state.save_collection(&mut self.persistence, collection);
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn current_user(&self) -> &User {
        &self.state.current_user
    }

    #[must_use]
    pub fn all_users(&self) -> &[User] {
        &self.state.all_users
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    #[must_use]
    pub fn saved_posts(&self) -> &BTreeSet<String> {
        &self.state.saved_posts
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    #[must_use]
    pub fn connection_requests(&self) -> &[ConnectionRequest] {
        &self.state.connection_requests
    }

    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.state.conversations
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    pub fn into_backend(self) -> B {
        self.persistence.into_backend()
    }
}
