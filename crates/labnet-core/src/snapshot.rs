//! Embedded snapshots.
//!
//! Posts, comments, notifications and connection requests carry a copy of
//! the user who created them. The copy is taken once and never follows
//! later edits to the source record.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A copy of `T` captured at the moment another entity was created.
///
/// Serializes exactly like `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot<T>(T);

impl<T: Clone> Snapshot<T> {
    /// Capture the current value of `source`.
    #[must_use]
    pub fn capture(source: &T) -> Self {
        Self(source.clone())
    }
}

impl<T> Snapshot<T> {
    /// Unwrap the captured value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Snapshot<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn capture_is_detached_from_source() {
        let mut source = Named {
            name: "before".to_string(),
        };
        let snap = Snapshot::capture(&source);
        source.name = "after".to_string();

        assert_eq!(snap.name, "before");
    }

    #[test]
    fn snapshot_serializes_transparently() {
        let snap = Snapshot::from(Named {
            name: "Ada".to_string(),
        });
        let json = serde_json::to_string(&snap).expect("serialize");
        assert_eq!(json, r#"{"name":"Ada"}"#);
    }
}
