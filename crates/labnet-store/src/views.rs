//! Read-side queries over [`AppState`].
//!
//! Everything here borrows from the state and never mutates it. Text
//! matching is a case-insensitive substring test; an empty needle matches
//! everything.

use serde::Serialize;

use labnet_core::{ConnectionRequest, Message, Post, PostKind, User};

use crate::state::AppState;

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Hits for one query, split the way they are presented.
#[derive(Debug, Default, Serialize)]
pub struct SearchResults<'a> {
    pub people: Vec<&'a User>,
    /// Plain posts only; articles and jobs have their own lists.
    pub posts: Vec<&'a Post>,
    pub articles: Vec<&'a Post>,
    pub jobs: Vec<&'a Post>,
}

impl SearchResults<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.posts.is_empty()
            && self.articles.is_empty()
            && self.jobs.is_empty()
    }

    /// Number of matching posts of any kind.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.len() + self.articles.len() + self.jobs.len()
    }
}

/// Match `query` against other users (name, title, institution) and posts
/// (content, author name).
#[must_use]
pub fn search<'a>(state: &'a AppState, query: &str) -> SearchResults<'a> {
    let needle = query.to_lowercase();
    let mut results = SearchResults {
        people: state
            .all_users
            .iter()
            .filter(|u| {
                contains(&u.name, &needle)
                    || contains(&u.title, &needle)
                    || contains(&u.institution, &needle)
            })
            .collect(),
        ..SearchResults::default()
    };

    let hits = state
        .posts
        .iter()
        .filter(|p| contains(&p.content, &needle) || contains(&p.author.name, &needle));
    for post in hits {
        match post.kind {
            PostKind::Post => results.posts.push(post),
            PostKind::Article => results.articles.push(post),
            PostKind::Job => results.jobs.push(post),
        }
    }
    results
}

/// Criteria for [`filter_jobs`]. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Substring of position, company or post content.
    pub text: Option<String>,
    /// Substring of the location.
    pub location: Option<String>,
    /// Exact job type, e.g. `full-time`.
    pub job_type: Option<String>,
    /// Exact field, e.g. `Quantum Computing`.
    pub field: Option<String>,
}

impl JobFilter {
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        if post.kind != PostKind::Job {
            return false;
        }
        let details = post.job_details.as_ref();

        let text = self.text.as_deref().map_or(true, |text| {
            let needle = text.to_lowercase();
            details.is_some_and(|d| contains(&d.position, &needle) || contains(&d.company, &needle))
                || contains(&post.content, &needle)
        });
        let location = self.location.as_deref().map_or(true, |location| {
            let needle = location.to_lowercase();
            details.is_some_and(|d| contains(&d.location, &needle))
        });
        let job_type = self
            .job_type
            .as_deref()
            .map_or(true, |t| details.is_some_and(|d| d.job_type == t));
        let field = self
            .field
            .as_deref()
            .map_or(true, |f| details.is_some_and(|d| d.field == f));

        text && location && job_type && field
    }
}

/// Job offers matching `filter`, in feed order.
#[must_use]
pub fn filter_jobs<'a>(state: &'a AppState, filter: &JobFilter) -> Vec<&'a Post> {
    state.posts.iter().filter(|p| filter.matches(p)).collect()
}

/// Users the current user is connected to.
#[must_use]
pub fn connections(state: &AppState) -> Vec<&User> {
    state
        .all_users
        .iter()
        .filter(|u| state.current_user.is_connected_to(&u.id))
        .collect()
}

/// Pending requests addressed to the current user.
#[must_use]
pub fn received_requests(state: &AppState) -> Vec<&ConnectionRequest> {
    let me = &state.current_user.id;
    state
        .connection_requests
        .iter()
        .filter(|r| r.is_pending() && &r.to == me)
        .collect()
}

/// Pending requests the current user sent.
#[must_use]
pub fn sent_requests(state: &AppState) -> Vec<&ConnectionRequest> {
    let me = &state.current_user.id;
    state
        .connection_requests
        .iter()
        .filter(|r| r.is_pending() && &r.from.id == me)
        .collect()
}

/// Up to `limit` people to connect with: not the current user, not
/// already connected, and not waiting on a request from the current user.
#[must_use]
pub fn suggestions(state: &AppState, limit: usize) -> Vec<&User> {
    let me = &state.current_user;
    let awaiting: Vec<&str> = sent_requests(state)
        .into_iter()
        .map(|r| r.to.as_str())
        .collect();
    state
        .all_users
        .iter()
        .filter(|u| u.id != me.id && !me.is_connected_to(&u.id))
        .filter(|u| !awaiting.contains(&u.id.as_str()))
        .take(limit)
        .collect()
}

/// Messages of one conversation, oldest first.
#[must_use]
pub fn conversation_thread<'a>(state: &'a AppState, conversation_id: &str) -> Vec<&'a Message> {
    let mut thread: Vec<&Message> = state
        .messages
        .iter()
        .filter(|m| m.conversation_id == conversation_id)
        .collect();
    thread.sort_by_key(|m| m.timestamp);
    thread
}

/// Saved posts that still exist, in feed order.
#[must_use]
pub fn saved_posts(state: &AppState) -> Vec<&Post> {
    state
        .posts
        .iter()
        .filter(|p| state.saved_posts.contains(&p.id))
        .collect()
}

#[must_use]
pub fn unread_notification_count(state: &AppState) -> usize {
    state.notifications.iter().filter(|n| !n.read).count()
}

/// Any user by id, the current user included.
#[must_use]
pub fn find_user<'a>(state: &'a AppState, id: &str) -> Option<&'a User> {
    state.find_user(id)
}
