//! # labnet-storage
//!
//! Durable mirror of the labnet collections.
//!
//! Each top-level collection lives under a fixed key ([`Collection`]) in a
//! [`KeyValueStore`]. The [`Persistence`] adapter on top is best-effort:
//! reads fall back to a default, writes that fail are logged and dropped.
//! The in-memory state is authoritative; the backend only has to be good
//! enough to restore it on the next start.

pub mod backend;
pub mod file;
pub mod keys;
pub mod persistence;

pub use backend::{KeyValueStore, MemoryStore, NullStore};
pub use file::FileStore;
pub use keys::Collection;
pub use persistence::Persistence;
