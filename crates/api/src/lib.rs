//! Async facade over the platform's domain surfaces.
//!
//! Each trait has a `Noop` implementation that returns empty/default
//! responses, so consumers can be wired before the domain services are. The
//! trait boundary is the seam where a real RPC client would replace
//! [`LocalApi`](local::LocalApi) without changing call sites.

use {
    async_trait::async_trait,
    rallyhub_apps::InstalledApp,
    rallyhub_campaigns::{Campaign, CampaignCreate, CampaignPatch},
    rallyhub_catalog::{Announcement, ChatMessage, Guild, GuildMember, LeaderboardEntry, StoreApp},
    rallyhub_common::AppKind,
};

pub mod auth;
pub mod bootstrap;
pub mod local;

pub use {
    auth::AuthSession,
    bootstrap::{Platform, build},
    local::LocalApi,
};

/// Error type returned by facade methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{message}")]
    Message { message: String },
}

impl ApiError {
    #[must_use]
    pub fn message(message: impl std::fmt::Display) -> Self {
        Self::Message {
            message: message.to_string(),
        }
    }
}

impl From<String> for ApiError {
    fn from(value: String) -> Self {
        Self::message(value)
    }
}

impl From<&str> for ApiError {
    fn from(value: &str) -> Self {
        Self::message(value)
    }
}

impl From<rallyhub_campaigns::Error> for ApiError {
    fn from(err: rallyhub_campaigns::Error) -> Self {
        match err {
            rallyhub_campaigns::Error::NotFound { id } => Self::NotFound { what: id },
            rallyhub_campaigns::Error::Validation { field, message } => {
                Self::Validation { field, message }
            },
        }
    }
}

impl From<rallyhub_apps::Error> for ApiError {
    fn from(err: rallyhub_apps::Error) -> Self {
        match err {
            rallyhub_apps::Error::NotFound { app_id } => Self::NotFound { what: app_id },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ── Campaigns ────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CampaignApi: Send + Sync {
    async fn list_by_guild(&self, guild_id: &str) -> ApiResult<Vec<Campaign>>;
    async fn active_by_guild_and_kind(
        &self,
        guild_id: &str,
        kind: AppKind,
    ) -> ApiResult<Vec<Campaign>>;
    async fn create(&self, create: CampaignCreate) -> ApiResult<Campaign>;
    async fn update(&self, id: &str, patch: CampaignPatch) -> ApiResult<Campaign>;
    async fn remove(&self, id: &str) -> ApiResult<()>;
}

pub struct NoopCampaignApi;

#[async_trait]
impl CampaignApi for NoopCampaignApi {
    async fn list_by_guild(&self, _guild_id: &str) -> ApiResult<Vec<Campaign>> {
        Ok(Vec::new())
    }

    async fn active_by_guild_and_kind(
        &self,
        _guild_id: &str,
        _kind: AppKind,
    ) -> ApiResult<Vec<Campaign>> {
        Ok(Vec::new())
    }

    async fn create(&self, _create: CampaignCreate) -> ApiResult<Campaign> {
        Err("campaign service not configured".into())
    }

    async fn update(&self, _id: &str, _patch: CampaignPatch) -> ApiResult<Campaign> {
        Err("campaign service not configured".into())
    }

    async fn remove(&self, _id: &str) -> ApiResult<()> {
        Err("campaign service not configured".into())
    }
}

// ── App store ────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AppStoreApi: Send + Sync {
    async fn catalog_apps(&self) -> ApiResult<Vec<StoreApp>>;
    async fn install(&self, guild_id: &str, app_id: &str, user_id: &str)
    -> ApiResult<InstalledApp>;
    async fn uninstall(&self, guild_id: &str, app_id: &str) -> ApiResult<bool>;
    async fn is_installed(&self, guild_id: &str, app_id: &str) -> ApiResult<bool>;
    async fn installed_apps(&self, guild_id: &str) -> ApiResult<Vec<InstalledApp>>;
}

pub struct NoopAppStoreApi;

#[async_trait]
impl AppStoreApi for NoopAppStoreApi {
    async fn catalog_apps(&self) -> ApiResult<Vec<StoreApp>> {
        Ok(Vec::new())
    }

    async fn install(
        &self,
        _guild_id: &str,
        _app_id: &str,
        _user_id: &str,
    ) -> ApiResult<InstalledApp> {
        Err("app store service not configured".into())
    }

    async fn uninstall(&self, _guild_id: &str, _app_id: &str) -> ApiResult<bool> {
        Ok(false)
    }

    async fn is_installed(&self, _guild_id: &str, _app_id: &str) -> ApiResult<bool> {
        Ok(false)
    }

    async fn installed_apps(&self, _guild_id: &str) -> ApiResult<Vec<InstalledApp>> {
        Ok(Vec::new())
    }
}

// ── Community ────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CommunityApi: Send + Sync {
    async fn guilds(&self) -> ApiResult<Vec<Guild>>;
    async fn guild(&self, guild_id: &str) -> ApiResult<Option<Guild>>;
    async fn members(&self, guild_id: &str) -> ApiResult<Vec<GuildMember>>;
    async fn announcements(&self, guild_id: &str) -> ApiResult<Vec<Announcement>>;
    async fn chat_messages(&self, guild_id: &str) -> ApiResult<Vec<ChatMessage>>;
    async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>>;
}

pub struct NoopCommunityApi;

#[async_trait]
impl CommunityApi for NoopCommunityApi {
    async fn guilds(&self) -> ApiResult<Vec<Guild>> {
        Ok(Vec::new())
    }

    async fn guild(&self, _guild_id: &str) -> ApiResult<Option<Guild>> {
        Ok(None)
    }

    async fn members(&self, _guild_id: &str) -> ApiResult<Vec<GuildMember>> {
        Ok(Vec::new())
    }

    async fn announcements(&self, _guild_id: &str) -> ApiResult<Vec<Announcement>> {
        Ok(Vec::new())
    }

    async fn chat_messages(&self, _guild_id: &str) -> ApiResult<Vec<ChatMessage>> {
        Ok(Vec::new())
    }

    async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        Ok(Vec::new())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_reads_are_empty_and_writes_refuse() {
        let campaigns = NoopCampaignApi;
        assert!(campaigns.list_by_guild("g1").await.unwrap().is_empty());
        assert!(campaigns.remove("c1").await.is_err());

        let apps = NoopAppStoreApi;
        assert!(!apps.is_installed("g1", "a1").await.unwrap());
        assert!(apps.install("g1", "a1", "u1").await.is_err());

        let community = NoopCommunityApi;
        assert!(community.guilds().await.unwrap().is_empty());
        assert!(community.guild("g1").await.unwrap().is_none());
    }

    #[test]
    fn test_domain_errors_map_onto_api_error() {
        let err: ApiError = rallyhub_campaigns::Error::not_found("c1").into();
        assert!(matches!(err, ApiError::NotFound { .. }));

        let err: ApiError = rallyhub_campaigns::Error::invalid("name", "must not be empty").into();
        assert!(matches!(err, ApiError::Validation { field: "name", .. }));

        let err: ApiError = rallyhub_apps::Error::not_found("app-42").into();
        assert!(matches!(err, ApiError::NotFound { what } if what == "app-42"));
    }
}
