//! Immutable seed datasets: the store-app catalog, guild profiles, members,
//! and community fixtures (announcements, chat history, leaderboard).
//!
//! Everything here is a read-only baseline. Stores merge it with their own
//! dynamic records; nothing in the workspace mutates a [`Catalog`] after
//! construction.

pub mod catalog;
pub mod types;

pub use {
    catalog::Catalog,
    types::{
        Announcement, ChatMessage, Guild, GuildMember, LeaderboardEntry, SeedInstall, StoreApp,
        User,
    },
};
