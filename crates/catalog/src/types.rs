//! Record types for the seed datasets.

use {
    chrono::{DateTime, Utc},
    rallyhub_common::{AppKind, GuildRole},
    serde::{Deserialize, Serialize},
};

/// An installable application definition, independent of any guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreApp {
    pub id: String,
    pub kind: AppKind,
    pub name: String,
    pub description: String,
    /// Emoji or icon slug rendered by consumers.
    pub icon: String,
    /// Accent color as a hex string.
    pub color: String,
}

/// A community/workspace tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Membership of a user in a guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildMember {
    pub guild_id: String,
    pub user_id: String,
    pub display_name: String,
    pub role: GuildRole,
    pub joined_at: DateTime<Utc>,
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub avatar: String,
}

/// An app pre-installed on a guild at seed time. Resolved against the
/// store-app catalog by id; seed entries take precedence over dynamic
/// installs of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedInstall {
    pub guild_id: String,
    pub app_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub guild_id: String,
    pub title: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub guild_id: String,
    pub author_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub points: u64,
}
