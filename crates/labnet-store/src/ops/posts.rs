//! Feed operations: posts, likes, shares, comments and saved posts.

use std::collections::BTreeSet;

use labnet_core::{Comment, NotificationKind, Post, PostDraft, PostPatch};
use labnet_storage::Collection;

use crate::clock::stamp_id;
use crate::mutation::Mutation;

impl Mutation<'_> {
    /// Publish a draft as the current user. The post goes to the front of
    /// the feed; returns its id.
    pub fn add_post(&mut self, draft: PostDraft) -> String {
        let timestamp = self.timeline.next();
        let id = stamp_id("post", timestamp);
        let post = Post {
            id: id.clone(),
            author: self.me(),
            content: draft.content,
            images: draft.images,
            youtube_url: draft.youtube_url,
            pdf_url: draft.pdf_url,
            likes: BTreeSet::new(),
            comments: Vec::new(),
            shares: 0,
            timestamp,
            kind: draft.kind,
            job_details: draft.job_details,
            article_details: draft.article_details,
        };
        self.state.posts.insert(0, post);
        self.touch(Collection::Posts);
        id
    }

    pub fn update_post(&mut self, id: &str, patch: PostPatch) -> bool {
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        patch.apply_to(post);
        self.touch(Collection::Posts);
        true
    }

    /// Remove a post, and its id from the saved list so nothing dangles.
    pub fn delete_post(&mut self, id: &str) -> bool {
        let before = self.state.posts.len();
        self.state.posts.retain(|p| p.id != id);
        let removed = self.state.posts.len() != before;
        if removed {
            self.touch(Collection::Posts);
        }
        if self.state.saved_posts.remove(id) {
            self.touch(Collection::SavedPosts);
        }
        removed
    }

    /// Toggle the current user's like. Returns whether the post is now
    /// liked, or `None` if there is no such post.
    ///
    /// A new like on someone else's post notifies its author; unliking
    /// leaves earlier notifications in place.
    pub fn like_post(&mut self, post_id: &str) -> Option<bool> {
        let me = self.current_user_id();
        let post = self.state.posts.iter_mut().find(|p| p.id == post_id)?;
        let liked = if post.likes.remove(&me) {
            false
        } else {
            post.likes.insert(me.clone());
            true
        };
        let foreign = post.author.id != me;
        self.touch(Collection::Posts);

        if liked && foreign {
            let timestamp = self.timeline.next();
            self.notify(
                stamp_id("notif", timestamp),
                NotificationKind::Like,
                Some(post_id.to_string()),
                "liked your post",
                timestamp,
            );
        }
        Some(liked)
    }

    /// Count a share and notify the author if it is someone else.
    pub fn share_post(&mut self, post_id: &str) -> bool {
        let me = self.current_user_id();
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == post_id) else {
            return false;
        };
        post.shares += 1;
        let foreign = post.author.id != me;
        self.touch(Collection::Posts);

        if foreign {
            let timestamp = self.timeline.next();
            self.notify(
                stamp_id("notif", timestamp),
                NotificationKind::Share,
                Some(post_id.to_string()),
                "shared your post",
                timestamp,
            );
        }
        true
    }

    /// Append a comment by the current user. `parent_id` marks a reply; it
    /// is stored as given and not checked against existing comments.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        content: String,
        parent_id: Option<String>,
    ) -> Option<String> {
        let index = self.state.posts.iter().position(|p| p.id == post_id)?;
        let me = self.me();
        let timestamp = self.timeline.next();
        let id = stamp_id("comment", timestamp);

        let post = &mut self.state.posts[index];
        let foreign = post.author.id != me.id;
        post.comments.push(Comment {
            id: id.clone(),
            post_id: post_id.to_string(),
            author: me,
            content,
            timestamp,
            parent_id,
        });
        self.touch(Collection::Posts);

        if foreign {
            self.notify(
                format!("{}-comment", stamp_id("notif", timestamp)),
                NotificationKind::Comment,
                Some(post_id.to_string()),
                "commented on your post",
                timestamp,
            );
        }
        Some(id)
    }

    pub fn delete_comment(&mut self, post_id: &str, comment_id: &str) -> bool {
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == post_id) else {
            return false;
        };
        let before = post.comments.len();
        post.comments.retain(|c| c.id != comment_id);
        let removed = post.comments.len() != before;
        if removed {
            self.touch(Collection::Posts);
        }
        removed
    }

    /// Flip membership of `post_id` in the saved list. Returns whether it
    /// is saved afterwards.
    pub fn toggle_save_post(&mut self, post_id: &str) -> bool {
        let saved = if self.state.saved_posts.remove(post_id) {
            false
        } else {
            self.state.saved_posts.insert(post_id.to_string());
            true
        };
        self.touch(Collection::SavedPosts);
        saved
    }
}

#[cfg(test)]
mod tests {
    use labnet_core::{JobDetails, PostKind};
    use labnet_storage::Collection;

    use crate::test_support::store;
    use labnet_core::{NotificationKind, PostDraft, PostPatch};

    fn draft(content: &str) -> PostDraft {
        PostDraft {
            content: content.to_string(),
            ..PostDraft::default()
        }
    }

    #[test]
    fn add_post_prepends_with_current_user_as_author() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.add_post(draft("First results are in")));

        let first = &store.posts()[0];
        assert_eq!(first.id, id);
        assert!(id.starts_with("post-"));
        assert_eq!(first.author.id, "1");
        assert!(first.likes.is_empty());
        assert_eq!(first.shares, 0);
    }

    #[test]
    fn consecutive_posts_get_distinct_ids_and_newest_first() {
        let (mut store, _clock) = store();
        let (a, b) = store.mutate(|m| (m.add_post(draft("a")), m.add_post(draft("b"))));

        assert_ne!(a, b);
        assert_eq!(store.posts()[0].id, b);
        assert_eq!(store.posts()[1].id, a);
        assert!(store.posts()[0].timestamp > store.posts()[1].timestamp);
    }

    #[test]
    fn job_details_are_kept_as_given() {
        let (mut store, _clock) = store();
        let job = PostDraft {
            kind: PostKind::Job,
            job_details: Some(JobDetails {
                position: "Postdoc".to_string(),
                company: "CERN".to_string(),
                location: String::new(),
                ..JobDetails::default()
            }),
            ..PostDraft::default()
        };
        // The store accepts any well-typed details; required fields are
        // checked before the call.
        let id = store.mutate(|m| m.add_post(job));
        let post = store.state().find_post(&id).unwrap();
        assert_eq!(post.job_details.as_ref().unwrap().company, "CERN");
    }

    #[test]
    fn update_post_merges_fields() {
        let (mut store, _clock) = store();
        let patch = PostPatch {
            content: Some("Corrected figures".to_string()),
            ..PostPatch::default()
        };
        assert!(store.mutate(|m| m.update_post("post-4", patch)));

        let post = store.state().find_post("post-4").unwrap();
        assert_eq!(post.content, "Corrected figures");
        assert_eq!(post.shares, 5);
    }

    #[test]
    fn update_missing_post_is_a_noop() {
        let (mut store, _clock) = store();
        let before = store.state().clone();
        assert!(!store.mutate(|m| m.update_post("post-404", PostPatch::default())));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn delete_post_also_unsaves_it() {
        let (mut store, _clock) = store();
        store.mutate(|m| m.toggle_save_post("post-2"));
        assert!(store.saved_posts().contains("post-2"));

        assert!(store.mutate(|m| m.delete_post("post-2")));
        assert!(store.state().find_post("post-2").is_none());
        assert!(!store.saved_posts().contains("post-2"));
    }

    #[test]
    fn like_toggles_and_notifies_foreign_author_once() {
        let (mut store, _clock) = store();
        // post-4 is by user 2 and not yet liked by user 1.
        assert_eq!(store.mutate(|m| m.like_post("post-4")), Some(true));
        assert_eq!(store.notifications().len(), 1);
        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationKind::Like);
        assert_eq!(n.post_id.as_deref(), Some("post-4"));
        assert_eq!(n.from.id, "1");
        assert!(!n.read);

        assert_eq!(store.mutate(|m| m.like_post("post-4")), Some(false));
        // Unliking keeps the notification.
        assert_eq!(store.notifications().len(), 1);
        assert!(!store.state().find_post("post-4").unwrap().is_liked_by("1"));
    }

    #[test]
    fn liking_own_post_never_notifies() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.add_post(draft("mine")));
        assert_eq!(store.mutate(|m| m.like_post(&id)), Some(true));
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn like_missing_post_is_a_noop() {
        let (mut store, _clock) = store();
        assert_eq!(store.mutate(|m| m.like_post("post-404")), None);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn share_counts_and_notifies_foreign_author() {
        let (mut store, _clock) = store();
        assert!(store.mutate(|m| m.share_post("post-1")));
        assert_eq!(store.state().find_post("post-1").unwrap().shares, 13);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Share);

        let own = store.mutate(|m| m.add_post(draft("mine")));
        store.mutate(|m| m.share_post(&own));
        assert_eq!(store.notifications().len(), 1);
    }

    #[test]
    fn comment_appends_and_notifies() {
        let (mut store, _clock) = store();
        let id = store
            .mutate(|m| m.add_comment("post-1", "Congratulations!".to_string(), None))
            .unwrap();

        let post = store.state().find_post("post-1").unwrap();
        let comment = post.comments.last().unwrap();
        assert_eq!(comment.id, id);
        assert_eq!(comment.post_id, "post-1");
        assert_eq!(comment.author.id, "1");

        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationKind::Comment);
        assert!(n.id.ends_with("-comment"));
    }

    #[test]
    fn reply_keeps_unresolved_parent() {
        let (mut store, _clock) = store();
        store.mutate(|m| {
            m.add_comment("post-1", "reply".to_string(), Some("comment-missing".to_string()))
        });
        let post = store.state().find_post("post-1").unwrap();
        assert_eq!(post.replies_to("comment-missing").count(), 1);
    }

    #[test]
    fn comment_on_own_post_is_silent() {
        let (mut store, _clock) = store();
        let own = store.mutate(|m| m.add_post(draft("mine")));
        store.mutate(|m| m.add_comment(&own, "note to self".to_string(), None));
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn delete_comment_filters_by_id() {
        let (mut store, _clock) = store();
        let id = store
            .mutate(|m| m.add_comment("post-3", "hello".to_string(), None))
            .unwrap();
        assert!(store.mutate(|m| m.delete_comment("post-3", &id)));
        assert!(store.state().find_post("post-3").unwrap().comments.is_empty());
        assert!(!store.mutate(|m| m.delete_comment("post-3", &id)));
    }

    #[test]
    fn toggle_save_touches_only_saved_posts() {
        let (mut store, _clock) = store();
        let changes = store.mutate(|m| {
            m.toggle_save_post("post-1");
            m.changes().clone()
        });
        assert!(changes.contains(Collection::SavedPosts));
        assert!(!changes.contains(Collection::Notifications));
        assert!(store.notifications().is_empty());
    }
}
