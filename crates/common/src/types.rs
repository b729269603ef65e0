//! Closed kind and role sets shared by the catalog, stores, and contexts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an installable campaign module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppKind {
    /// Mindshare / information-finance campaigns.
    InfoFi,
    /// User-generated content bounties.
    Ugc,
    /// Short-form clipping campaigns.
    Clipping,
    /// Point-based social task lists.
    SocialTasks,
    /// Embedded mini apps.
    Mini,
}

impl AppKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InfoFi => "infoFi",
            Self::Ugc => "ugc",
            Self::Clipping => "clipping",
            Self::SocialTasks => "socialTasks",
            Self::Mini => "mini",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller's role within a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GuildRole {
    Admin,
    Moderator,
    Member,
    /// Browsing without membership.
    #[default]
    None,
}

impl GuildRole {
    /// Whether this role may install, remove, or customize guild apps.
    #[must_use]
    pub fn can_manage_apps(self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }

    #[must_use]
    pub fn is_member(self) -> bool {
        !matches!(self, Self::None)
    }
}
