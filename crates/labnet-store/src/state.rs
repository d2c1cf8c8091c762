//! The in-memory collections and their durable mirror.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use labnet_core::{ConnectionRequest, Conversation, Message, Notification, Post, User};
use labnet_storage::{Collection, KeyValueStore, Persistence};

use crate::seed;

/// Every collection the store owns.
///
/// Front ends read from it but hold no authoritative copy: the next
/// mutation may replace any slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_user: User,
    pub all_users: Vec<User>,
    /// Most recent first, by insertion.
    pub posts: Vec<Post>,
    pub saved_posts: BTreeSet<String>,
    /// Most recent first.
    pub notifications: Vec<Notification>,
    pub connection_requests: Vec<ConnectionRequest>,
    pub conversations: Vec<Conversation>,
    /// In send order.
    pub messages: Vec<Message>,
    /// Transient; never persisted.
    #[serde(skip)]
    pub search_query: String,
}

impl AppState {
    /// State made only of seed data, with seed timestamps relative to `now`.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            current_user: seed::current_user(),
            all_users: seed::other_users(),
            posts: seed::posts(now),
            saved_posts: BTreeSet::new(),
            notifications: Vec::new(),
            connection_requests: Vec::new(),
            conversations: Vec::new(),
            messages: Vec::new(),
            search_query: String::new(),
        }
    }

    /// Load every collection, falling back to seed data per collection.
    pub fn load<B: KeyValueStore>(persistence: &Persistence<B>, now: DateTime<Utc>) -> Self {
        let state = Self {
            current_user: persistence.load(Collection::CurrentUser, seed::current_user),
            all_users: persistence.load(Collection::AllUsers, seed::other_users),
            posts: persistence.load(Collection::Posts, || seed::posts(now)),
            saved_posts: persistence.load(Collection::SavedPosts, BTreeSet::new),
            notifications: persistence.load(Collection::Notifications, Vec::new),
            connection_requests: persistence.load(Collection::ConnectionRequests, Vec::new),
            conversations: persistence.load(Collection::Conversations, Vec::new),
            messages: persistence.load(Collection::Messages, Vec::new),
            search_query: String::new(),
        };
        info!(
            user = %state.current_user.id,
            posts = state.posts.len(),
            users = state.all_users.len(),
            "state loaded"
        );
        state
    }

    /// Write one collection through `persistence`.
    pub fn save_collection<B: KeyValueStore>(
        &self,
        persistence: &mut Persistence<B>,
        collection: Collection,
    ) {
        match collection {
            Collection::CurrentUser => persistence.save(collection, &self.current_user),
            Collection::AllUsers => persistence.save(collection, &self.all_users),
            Collection::Posts => persistence.save(collection, &self.posts),
            Collection::SavedPosts => persistence.save(collection, &self.saved_posts),
            Collection::Notifications => persistence.save(collection, &self.notifications),
            Collection::ConnectionRequests => {
                persistence.save(collection, &self.connection_requests);
            }
            Collection::Conversations => persistence.save(collection, &self.conversations),
            Collection::Messages => persistence.save(collection, &self.messages),
        }
    }

    /// Look a user up by id, current user included.
    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        if self.current_user.id == id {
            return Some(&self.current_user);
        }
        self.all_users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Newest timestamp anywhere in the state.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        let posts = self.posts.iter().flat_map(|p| {
            std::iter::once(p.timestamp).chain(p.comments.iter().map(|c| c.timestamp))
        });
        posts
            .chain(self.notifications.iter().map(|n| n.timestamp))
            .chain(self.connection_requests.iter().map(|r| r.timestamp))
            .chain(self.messages.iter().map(|m| m.timestamp))
            .max()
    }
}

/// The set of collections touched by a batch of mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes(BTreeSet<Collection>);

impl Changes {
    pub fn insert(&mut self, collection: Collection) {
        self.0.insert(collection);
    }

    #[must_use]
    pub fn contains(&self, collection: Collection) -> bool {
        self.0.contains(&collection)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Collection> + '_ {
        self.0.iter().copied()
    }
}
