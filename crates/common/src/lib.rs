//! Shared kinds, roles, and the change-notification primitive used across all
//! rallyhub crates.

pub mod notify;
pub mod types;

pub use {
    notify::{ChangeNotifier, Subscription},
    types::{AppKind, GuildRole},
};
