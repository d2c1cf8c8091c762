//! Best-effort typed access to the durable collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::keys::Collection;

/// Typed, infallible facade over a [`KeyValueStore`].
///
/// `load` never fails: anything short of a stored, decodable value yields
/// the caller's default. `save` is fire-and-forget: a failed write is
/// logged and dropped, and the next session sees the last snapshot that
/// did make it to the backend.
#[derive(Debug)]
pub struct Persistence<B> {
    backend: B,
}

impl<B: KeyValueStore> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load `collection`, or `default()` if it is absent, unreadable or
    /// does not decode.
    pub fn load<T, F>(&self, collection: Collection, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.backend.read(collection.key()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%collection, error = %e, "stored collection does not decode; using default");
                    default()
                }
            },
            Ok(None) => {
                debug!(%collection, "no stored value; using default");
                default()
            }
            Err(e) => {
                warn!(%collection, error = %e, "storage read failed; using default");
                default()
            }
        }
    }

    /// Serialize `value` and store it under `collection`, replacing the
    /// previous snapshot. Failures are logged, never returned.
    pub fn save<T: Serialize + ?Sized>(&mut self, collection: Collection, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%collection, error = %e, "collection does not serialize; write dropped");
                return;
            }
        };
        match self.backend.write(collection.key(), &raw) {
            Ok(()) => debug!(%collection, bytes = raw.len(), "collection saved"),
            Err(e) => warn!(%collection, error = %e, "storage write failed; write dropped"),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryStore, NullStore};

    #[test]
    fn load_returns_default_when_absent() {
        let p = Persistence::new(MemoryStore::new());
        let saved: Vec<String> = p.load(Collection::SavedPosts, Vec::new);
        assert!(saved.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut p = Persistence::new(MemoryStore::new());
        p.save(Collection::SavedPosts, &vec!["post-1".to_string()]);

        let saved: Vec<String> = p.load(Collection::SavedPosts, Vec::new);
        assert_eq!(saved, vec!["post-1".to_string()]);
        assert_eq!(p.backend().get("savedPosts"), Some(r#"["post-1"]"#));
    }

    #[test]
    fn undecodable_value_is_treated_as_absent() {
        let mut backend = MemoryStore::new();
        backend.write("posts", "{not json").unwrap();
        let p = Persistence::new(backend);

        let posts: Vec<u32> = p.load(Collection::Posts, || vec![42]);
        assert_eq!(posts, vec![42]);
    }

    #[test]
    fn unavailable_storage_falls_back_and_drops_writes() {
        let mut p = Persistence::new(NullStore);
        p.save(Collection::Messages, &vec![1, 2, 3]);

        let messages: Vec<u32> = p.load(Collection::Messages, Vec::new);
        assert!(messages.is_empty());
    }
}
