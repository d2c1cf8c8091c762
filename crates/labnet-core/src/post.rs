//! Feed entries: posts, articles and job offers, with their comments.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::{double_option, merge};
use crate::snapshot::Snapshot;
use crate::user::User;

/// What a feed entry is. Decides which detail block is meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Post,
    Article,
    Job,
}

impl PostKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Article => "article",
            Self::Job => "job",
        }
    }
}

/// Job offer fields. `position`, `company` and `location` are required
/// when an offer is submitted interactively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub position: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub applications: u64,
}

/// Scientific article metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetails {
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub co_authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default)]
    pub citations: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub views: u64,
}

/// A comment on a post. Replies point at their parent through
/// `parent_id`; the parent is not required to exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: Snapshot<User>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: Snapshot<User>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// Ids of users who liked the post.
    #[serde(default)]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub shares: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: PostKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_details: Option<JobDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_details: Option<ArticleDetails>,
}

impl Post {
    #[must_use]
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.contains(user_id)
    }

    /// Top-level comments, in insertion order.
    pub fn top_level_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(|c| c.parent_id.is_none())
    }

    /// Replies to `comment_id`, in insertion order.
    pub fn replies_to<'a>(&'a self, comment_id: &'a str) -> impl Iterator<Item = &'a Comment> {
        self.comments
            .iter()
            .filter(move |c| c.parent_id.as_deref() == Some(comment_id))
    }
}

/// A post as submitted, before the store assigns id, author and time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: PostKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_details: Option<JobDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_details: Option<ArticleDetails>,
}

/// Partial update for [`Post`]. Likes, comments and the author are
/// managed by their own operations and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube_url: Option<Option<String>>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pdf_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PostKind>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_details: Option<Option<JobDetails>>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub article_details: Option<Option<ArticleDetails>>,
}

impl PostPatch {
    /// Shallow-merge the patch into `post`.
    pub fn apply_to(self, post: &mut Post) {
        merge(&mut post.content, self.content);
        merge(&mut post.images, self.images);
        merge(&mut post.youtube_url, self.youtube_url);
        merge(&mut post.pdf_url, self.pdf_url);
        merge(&mut post.shares, self.shares);
        merge(&mut post.kind, self.kind);
        merge(&mut post.job_details, self.job_details);
        merge(&mut post.article_details, self.article_details);
    }
}
