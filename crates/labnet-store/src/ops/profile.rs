//! Current-user profile edits.
//!
//! Experience, education, publications and projects are all lists of
//! entries with a store-assigned id, edited the same way. [`ProfileSection`]
//! describes one such list so the add/update/delete logic is written once.

use labnet_core::{
    Education, EducationPatch, Experience, ExperiencePatch, Project, ProjectPatch, Publication,
    PublicationPatch, User, UserPatch,
};
use labnet_storage::Collection;

use crate::clock::stamp_id;
use crate::mutation::Mutation;

/// An id-keyed list on the current user's profile.
pub trait ProfileSection: Sized {
    /// Partial update applied by [`Mutation::update_entry`].
    type Patch;

    /// Prefix of ids assigned on insert, e.g. `exp` for `exp-<ms>`.
    const ID_PREFIX: &'static str;

    fn section(user: &mut User) -> &mut Vec<Self>;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn apply(patch: Self::Patch, entry: &mut Self);
}

impl ProfileSection for Experience {
    type Patch = ExperiencePatch;
    const ID_PREFIX: &'static str = "exp";

    fn section(user: &mut User) -> &mut Vec<Self> {
        &mut user.experience
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply(patch: ExperiencePatch, entry: &mut Self) {
        patch.apply_to(entry);
    }
}

impl ProfileSection for Education {
    type Patch = EducationPatch;
    const ID_PREFIX: &'static str = "edu";

    fn section(user: &mut User) -> &mut Vec<Self> {
        &mut user.education
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply(patch: EducationPatch, entry: &mut Self) {
        patch.apply_to(entry);
    }
}

impl ProfileSection for Publication {
    type Patch = PublicationPatch;
    const ID_PREFIX: &'static str = "pub";

    fn section(user: &mut User) -> &mut Vec<Self> {
        &mut user.publications
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply(patch: PublicationPatch, entry: &mut Self) {
        patch.apply_to(entry);
    }
}

impl ProfileSection for Project {
    type Patch = ProjectPatch;
    const ID_PREFIX: &'static str = "proj";

    fn section(user: &mut User) -> &mut Vec<Self> {
        &mut user.projects
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply(patch: ProjectPatch, entry: &mut Self) {
        patch.apply_to(entry);
    }
}

impl Mutation<'_> {
    /// Shallow-merge `patch` into the current user, and into the matching
    /// record in the user directory if there is one.
    pub fn update_current_user(&mut self, patch: UserPatch) {
        let id = self.current_user_id();
        if let Some(listed) = self.state.all_users.iter_mut().find(|u| u.id == id) {
            patch.clone().apply_to(listed);
            self.touch(Collection::AllUsers);
        }
        patch.apply_to(&mut self.state.current_user);
        self.touch(Collection::CurrentUser);
    }

    /// Append `entry` to its section under a fresh id, replacing whatever
    /// id it carried. Returns the new id.
    pub fn add_entry<S: ProfileSection>(&mut self, mut entry: S) -> String {
        let id = stamp_id(S::ID_PREFIX, self.timeline.next());
        entry.set_id(id.clone());
        S::section(&mut self.state.current_user).push(entry);
        self.touch(Collection::CurrentUser);
        id
    }

    pub fn update_entry<S: ProfileSection>(&mut self, id: &str, patch: S::Patch) -> bool {
        let section = S::section(&mut self.state.current_user);
        let Some(entry) = section.iter_mut().find(|e| e.id() == id) else {
            return false;
        };
        S::apply(patch, entry);
        self.touch(Collection::CurrentUser);
        true
    }

    pub fn delete_entry<S: ProfileSection>(&mut self, id: &str) -> bool {
        let section = S::section(&mut self.state.current_user);
        let before = section.len();
        section.retain(|e| e.id() != id);
        let removed = section.len() != before;
        if removed {
            self.touch(Collection::CurrentUser);
        }
        removed
    }

    pub fn add_experience(&mut self, entry: Experience) -> String {
        self.add_entry(entry)
    }

    pub fn update_experience(&mut self, id: &str, patch: ExperiencePatch) -> bool {
        self.update_entry::<Experience>(id, patch)
    }

    pub fn delete_experience(&mut self, id: &str) -> bool {
        self.delete_entry::<Experience>(id)
    }

    pub fn add_education(&mut self, entry: Education) -> String {
        self.add_entry(entry)
    }

    pub fn update_education(&mut self, id: &str, patch: EducationPatch) -> bool {
        self.update_entry::<Education>(id, patch)
    }

    pub fn delete_education(&mut self, id: &str) -> bool {
        self.delete_entry::<Education>(id)
    }

    pub fn add_publication(&mut self, entry: Publication) -> String {
        self.add_entry(entry)
    }

    pub fn update_publication(&mut self, id: &str, patch: PublicationPatch) -> bool {
        self.update_entry::<Publication>(id, patch)
    }

    pub fn delete_publication(&mut self, id: &str) -> bool {
        self.delete_entry::<Publication>(id)
    }

    pub fn add_project(&mut self, entry: Project) -> String {
        self.add_entry(entry)
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> bool {
        self.update_entry::<Project>(id, patch)
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        self.delete_entry::<Project>(id)
    }

    pub fn add_to_gallery(&mut self, url: String) {
        self.state.current_user.gallery.push(url);
        self.touch(Collection::CurrentUser);
    }

    /// Remove every gallery entry equal to `url`.
    pub fn remove_from_gallery(&mut self, url: &str) -> bool {
        let gallery = &mut self.state.current_user.gallery;
        let before = gallery.len();
        gallery.retain(|u| u != url);
        let removed = gallery.len() != before;
        if removed {
            self.touch(Collection::CurrentUser);
        }
        removed
    }

    /// Set the transient search query. Nothing is persisted.
    pub fn set_search_query(&mut self, query: String) {
        self.state.search_query = query;
    }
}
