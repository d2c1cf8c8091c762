//! # labnet-core
//!
//! Domain model and error types for the labnet research network.
//!
//! This crate defines the vocabulary shared by the storage adapter, the
//! application state store and the command-line front end:
//! - [`User`] and its profile sections ([`Experience`], [`Education`],
//!   [`Publication`], [`Project`])
//! - [`Post`], [`Comment`] and the post kinds ([`PostKind`], [`JobDetails`],
//!   [`ArticleDetails`])
//! - [`Notification`] and [`ConnectionRequest`]
//! - [`Conversation`] and [`Message`]
//! - [`Snapshot`]: a copy of a record captured when another entity was created
//! - Error hierarchy ([`LabnetError`], [`StorageError`])

pub mod error;
pub mod message;
pub mod network;
pub mod notification;
mod patch;
pub mod post;
pub mod snapshot;
pub mod user;

pub use error::{LabnetError, Result, StorageError};
pub use message::{conversation_id, Conversation, Message};
pub use network::{ConnectionRequest, RequestStatus};
pub use notification::{Notification, NotificationKind};
pub use post::{ArticleDetails, Comment, JobDetails, Post, PostDraft, PostKind, PostPatch};
pub use snapshot::Snapshot;
pub use user::{
    Education, EducationPatch, Experience, ExperiencePatch, Project, ProjectPatch, ProjectStatus,
    Publication, PublicationPatch, User, UserPatch,
};
