//! Mutation operations, grouped by area.

mod messaging;
mod network;
mod notifications;
mod posts;
pub mod profile;
