//! User profiles and their editable sections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::patch::{double_option, merge};

/// A researcher profile.
///
/// Collection fields default to empty so snapshots written before a
/// section existed still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: String,

    /// Ids of connected users. Symmetric across the two records and never
    /// contains the user's own id.
    #[serde(default)]
    pub connections: BTreeSet<String>,

    #[serde(default)]
    pub profile_views: u64,
    #[serde(default)]
    pub citations: u64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub research_interests: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Image URLs. Entries have no id and are removed by value.
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl User {
    /// Whether `user_id` is among this user's connections.
    #[must_use]
    pub fn is_connected_to(&self, user_id: &str) -> bool {
        self.connections.contains(user_id)
    }

    /// Number of connections this user shares with `other`.
    #[must_use]
    pub fn mutual_connections(&self, other: &User) -> usize {
        self.connections.intersection(&other.connections).count()
    }
}

/// Partial update for [`User`]. Absent fields are left untouched.
///
/// `id` and `connections` are not patchable; connections change only
/// through the connection operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_interests: Option<Vec<String>>,
}

impl UserPatch {
    /// Shallow-merge the patch into `user`.
    pub fn apply_to(self, user: &mut User) {
        merge(&mut user.name, self.name);
        merge(&mut user.avatar, self.avatar);
        merge(&mut user.cover_image, self.cover_image);
        merge(&mut user.title, self.title);
        merge(&mut user.bio, self.bio);
        merge(&mut user.institution, self.institution);
        merge(&mut user.location, self.location);
        merge(&mut user.profile_views, self.profile_views);
        merge(&mut user.citations, self.citations);
        merge(&mut user.skills, self.skills);
        merge(&mut user.research_interests, self.research_interests);
    }
}

/// A position held by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Assigned by the store on insert; any incoming value is replaced.
    #[serde(default)]
    pub id: String,
    pub position: String,
    pub institution: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExperiencePatch {
    pub fn apply_to(self, entry: &mut Experience) {
        merge(&mut entry.position, self.position);
        merge(&mut entry.institution, self.institution);
        merge(&mut entry.start_date, self.start_date);
        merge(&mut entry.end_date, self.end_date);
        merge(&mut entry.current, self.current);
        merge(&mut entry.description, self.description);
    }
}

/// A degree, finished or in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: String,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    pub start_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_year: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
}

impl EducationPatch {
    pub fn apply_to(self, entry: &mut Education) {
        merge(&mut entry.institution, self.institution);
        merge(&mut entry.degree, self.degree);
        merge(&mut entry.field, self.field);
        merge(&mut entry.start_year, self.start_year);
        merge(&mut entry.end_year, self.end_year);
        merge(&mut entry.current, self.current);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub journal: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default)]
    pub citations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub doi: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
}

impl PublicationPatch {
    pub fn apply_to(self, entry: &mut Publication) {
        merge(&mut entry.title, self.title);
        merge(&mut entry.authors, self.authors);
        merge(&mut entry.journal, self.journal);
        merge(&mut entry.year, self.year);
        merge(&mut entry.doi, self.doi);
        merge(&mut entry.citations, self.citations);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Planned,
}

/// A research project. `team` holds user ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub team: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn apply_to(self, entry: &mut Project) {
        merge(&mut entry.name, self.name);
        merge(&mut entry.description, self.description);
        merge(&mut entry.status, self.status);
        merge(&mut entry.team, self.team);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, connections: &[&str]) -> User {
        User {
            id: id.to_string(),
            name: format!("User {id}"),
            connections: connections.iter().map(ToString::to_string).collect(),
            ..User::default()
        }
    }

    #[test]
    fn mutual_connections_counts_intersection() {
        let me = user("1", &["2", "3"]);
        let anna = user("2", &["1", "3"]);
        let maria = user("4", &[]);

        assert_eq!(me.mutual_connections(&anna), 1);
        assert_eq!(me.mutual_connections(&maria), 0);
    }

    #[test]
    fn user_uses_camel_case_keys() {
        let mut u = user("1", &["2"]);
        u.cover_image = "cover.jpg".to_string();
        u.research_interests = vec!["Cosmology".to_string()];

        let json = serde_json::to_value(&u).expect("serialize");
        assert_eq!(json["coverImage"], "cover.jpg");
        assert_eq!(json["researchInterests"][0], "Cosmology");
        assert_eq!(json["connections"][0], "2");
    }

    #[test]
    fn partial_user_loads_with_empty_sections() {
        // Older snapshots only carried the headline fields.
        let json = r#"{"id":"2","name":"Dr Anna Nowak","institution":"MIT","connections":["1","3"],"profileViews":234}"#;
        let u: User = serde_json::from_str(json).expect("deserialize");

        assert_eq!(u.profile_views, 234);
        assert!(u.experience.is_empty());
        assert!(u.gallery.is_empty());
        assert!(u.is_connected_to("3"));
    }

    #[test]
    fn duplicate_connection_ids_collapse_on_load() {
        let json = r#"{"id":"1","name":"Jan","connections":["2","2","3"]}"#;
        let u: User = serde_json::from_str(json).expect("deserialize");
        assert_eq!(u.connections.len(), 2);
    }

    #[test]
    fn user_patch_merges_only_present_fields() {
        let mut u = user("1", &[]);
        u.title = "PhD".to_string();
        u.bio = "old bio".to_string();

        let patch: UserPatch = serde_json::from_str(r#"{"bio":"new bio"}"#).unwrap();
        patch.apply_to(&mut u);

        assert_eq!(u.bio, "new bio");
        assert_eq!(u.title, "PhD");
    }

    #[test]
    fn experience_patch_can_clear_end_date() {
        let mut exp = Experience {
            id: "exp-1".to_string(),
            position: "Research Fellow".to_string(),
            institution: "MIT Media Lab".to_string(),
            start_date: "2018-06".to_string(),
            end_date: Some("2019-12".to_string()),
            current: false,
            description: String::new(),
        };

        let patch: ExperiencePatch =
            serde_json::from_str(r#"{"endDate":null,"current":true}"#).unwrap();
        patch.apply_to(&mut exp);

        assert_eq!(exp.end_date, None);
        assert!(exp.current);
        assert_eq!(exp.position, "Research Fellow");
    }

    #[test]
    fn project_status_is_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Planned).unwrap();
        assert_eq!(json, "\"planned\"");
    }
}
