//! Store operations as data.
//!
//! A [`Command`] names one mutation and carries its arguments, so a front
//! end can drive the store from JSON:
//!
//! ```json
//! {"op": "add_comment", "post_id": "post-1", "content": "Great work!"}
//! ```

use serde::{Deserialize, Serialize};

use labnet_core::{
    Education, EducationPatch, Experience, ExperiencePatch, PostDraft, PostPatch, Project,
    ProjectPatch, Publication, PublicationPatch, UserPatch,
};

use crate::mutation::Mutation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    UpdateCurrentUser {
        patch: UserPatch,
    },

    AddPost {
        draft: PostDraft,
    },
    UpdatePost {
        id: String,
        patch: PostPatch,
    },
    DeletePost {
        id: String,
    },
    LikePost {
        post_id: String,
    },
    SharePost {
        post_id: String,
    },
    AddComment {
        post_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
    },
    DeleteComment {
        post_id: String,
        comment_id: String,
    },
    ToggleSavePost {
        post_id: String,
    },

    MarkNotificationRead {
        id: String,
    },
    MarkAllNotificationsRead,

    SendConnectionRequest {
        to: String,
    },
    AcceptConnectionRequest {
        id: String,
    },
    RejectConnectionRequest {
        id: String,
    },
    WithdrawConnectionRequest {
        id: String,
    },
    RemoveConnection {
        user_id: String,
    },

    SendMessage {
        to: String,
        content: String,
    },
    MarkConversationRead {
        id: String,
    },

    AddExperience {
        entry: Experience,
    },
    UpdateExperience {
        id: String,
        patch: ExperiencePatch,
    },
    DeleteExperience {
        id: String,
    },
    AddEducation {
        entry: Education,
    },
    UpdateEducation {
        id: String,
        patch: EducationPatch,
    },
    DeleteEducation {
        id: String,
    },
    AddPublication {
        entry: Publication,
    },
    UpdatePublication {
        id: String,
        patch: PublicationPatch,
    },
    DeletePublication {
        id: String,
    },
    AddProject {
        entry: Project,
    },
    UpdateProject {
        id: String,
        patch: ProjectPatch,
    },
    DeleteProject {
        id: String,
    },
    AddToGallery {
        url: String,
    },
    RemoveFromGallery {
        url: String,
    },

    SetSearchQuery {
        query: String,
    },
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum Outcome {
    /// A new entity was created with this id.
    Created(String),
    /// The state changed (or the operation is unconditional).
    Applied,
    /// The target did not exist or the operation did not apply.
    Ignored,
}

impl Outcome {
    fn from_flag(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }

    fn from_created(id: Option<String>) -> Self {
        id.map_or(Self::Ignored, Self::Created)
    }
}

impl Command {
    /// The wire name of the operation, e.g. `like_post`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateCurrentUser { .. } => "update_current_user",
            Self::AddPost { .. } => "add_post",
            Self::UpdatePost { .. } => "update_post",
            Self::DeletePost { .. } => "delete_post",
            Self::LikePost { .. } => "like_post",
            Self::SharePost { .. } => "share_post",
            Self::AddComment { .. } => "add_comment",
            Self::DeleteComment { .. } => "delete_comment",
            Self::ToggleSavePost { .. } => "toggle_save_post",
            Self::MarkNotificationRead { .. } => "mark_notification_read",
            Self::MarkAllNotificationsRead => "mark_all_notifications_read",
            Self::SendConnectionRequest { .. } => "send_connection_request",
            Self::AcceptConnectionRequest { .. } => "accept_connection_request",
            Self::RejectConnectionRequest { .. } => "reject_connection_request",
            Self::WithdrawConnectionRequest { .. } => "withdraw_connection_request",
            Self::RemoveConnection { .. } => "remove_connection",
            Self::SendMessage { .. } => "send_message",
            Self::MarkConversationRead { .. } => "mark_conversation_read",
            Self::AddExperience { .. } => "add_experience",
            Self::UpdateExperience { .. } => "update_experience",
            Self::DeleteExperience { .. } => "delete_experience",
            Self::AddEducation { .. } => "add_education",
            Self::UpdateEducation { .. } => "update_education",
            Self::DeleteEducation { .. } => "delete_education",
            Self::AddPublication { .. } => "add_publication",
            Self::UpdatePublication { .. } => "update_publication",
            Self::DeletePublication { .. } => "delete_publication",
            Self::AddProject { .. } => "add_project",
            Self::UpdateProject { .. } => "update_project",
            Self::DeleteProject { .. } => "delete_project",
            Self::AddToGallery { .. } => "add_to_gallery",
            Self::RemoveFromGallery { .. } => "remove_from_gallery",
            Self::SetSearchQuery { .. } => "set_search_query",
        }
    }

    /// Run the command against an open mutation.
    pub fn apply(self, m: &mut Mutation<'_>) -> Outcome {
        match self {
            Self::UpdateCurrentUser { patch } => {
                m.update_current_user(patch);
                Outcome::Applied
            }
            Self::AddPost { draft } => Outcome::Created(m.add_post(draft)),
            Self::UpdatePost { id, patch } => Outcome::from_flag(m.update_post(&id, patch)),
            Self::DeletePost { id } => Outcome::from_flag(m.delete_post(&id)),
            Self::LikePost { post_id } => Outcome::from_flag(m.like_post(&post_id).is_some()),
            Self::SharePost { post_id } => Outcome::from_flag(m.share_post(&post_id)),
            Self::AddComment {
                post_id,
                content,
                parent_id,
            } => Outcome::from_created(m.add_comment(&post_id, content, parent_id)),
            Self::DeleteComment {
                post_id,
                comment_id,
            } => Outcome::from_flag(m.delete_comment(&post_id, &comment_id)),
            Self::ToggleSavePost { post_id } => {
                m.toggle_save_post(&post_id);
                Outcome::Applied
            }
            Self::MarkNotificationRead { id } => {
                Outcome::from_flag(m.mark_notification_read(&id))
            }
            Self::MarkAllNotificationsRead => {
                m.mark_all_notifications_read();
                Outcome::Applied
            }
            Self::SendConnectionRequest { to } => {
                Outcome::from_created(m.send_connection_request(&to))
            }
            Self::AcceptConnectionRequest { id } => {
                Outcome::from_flag(m.accept_connection_request(&id))
            }
            Self::RejectConnectionRequest { id } => {
                Outcome::from_flag(m.reject_connection_request(&id))
            }
            Self::WithdrawConnectionRequest { id } => {
                Outcome::from_flag(m.withdraw_connection_request(&id))
            }
            Self::RemoveConnection { user_id } => Outcome::from_flag(m.remove_connection(&user_id)),
            Self::SendMessage { to, content } => Outcome::from_created(m.send_message(&to, content)),
            Self::MarkConversationRead { id } => {
                Outcome::from_flag(m.mark_conversation_read(&id))
            }
            Self::AddExperience { entry } => Outcome::Created(m.add_experience(entry)),
            Self::UpdateExperience { id, patch } => {
                Outcome::from_flag(m.update_experience(&id, patch))
            }
            Self::DeleteExperience { id } => Outcome::from_flag(m.delete_experience(&id)),
            Self::AddEducation { entry } => Outcome::Created(m.add_education(entry)),
            Self::UpdateEducation { id, patch } => {
                Outcome::from_flag(m.update_education(&id, patch))
            }
            Self::DeleteEducation { id } => Outcome::from_flag(m.delete_education(&id)),
            Self::AddPublication { entry } => Outcome::Created(m.add_publication(entry)),
            Self::UpdatePublication { id, patch } => {
                Outcome::from_flag(m.update_publication(&id, patch))
            }
            Self::DeletePublication { id } => Outcome::from_flag(m.delete_publication(&id)),
            Self::AddProject { entry } => Outcome::Created(m.add_project(entry)),
            Self::UpdateProject { id, patch } => Outcome::from_flag(m.update_project(&id, patch)),
            Self::DeleteProject { id } => Outcome::from_flag(m.delete_project(&id)),
            Self::AddToGallery { url } => {
                m.add_to_gallery(url);
                Outcome::Applied
            }
            Self::RemoveFromGallery { url } => Outcome::from_flag(m.remove_from_gallery(&url)),
            Self::SetSearchQuery { query } => {
                m.set_search_query(query);
                Outcome::Applied
            }
        }
    }
}
