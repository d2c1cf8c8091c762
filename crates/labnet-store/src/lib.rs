//! # labnet-store
//!
//! The application state store: every collection of the research network
//! held in one [`AppState`], mutated through a short-lived [`Mutation`]
//! handle and mirrored to durable storage once per changed collection.
//!
//! - [`Store`]: owns the state, the persistence adapter and the clock
//! - [`Mutation`]: the operation surface (posts, network, messaging,
//!   notifications, profile)
//! - [`Command`]: the same operations as data, for front ends
//! - [`views`]: read-side queries (search, jobs, network, threads)
//! - [`seed`]: initial content used when nothing is persisted

pub mod clock;
pub mod command;
pub mod config;
pub mod mutation;
mod ops;
pub mod seed;
pub mod state;
pub mod store;
pub mod views;

pub use clock::{Clock, ManualClock, SystemClock, Timeline};
pub use command::{Command, Outcome};
pub use config::{MessagingConfig, StoreConfig};
pub use mutation::Mutation;
pub use ops::profile::ProfileSection;
pub use state::{AppState, Changes};
pub use store::Store;
pub use views::{JobFilter, SearchResults};

#[cfg(test)]
pub(crate) mod test_support;
