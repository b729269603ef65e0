//! In-process facade implementation over the stores and catalog.

use std::{sync::Arc, time::Duration};

use {
    async_trait::async_trait,
    rallyhub_apps::{AppInstallService, InstalledApp},
    rallyhub_campaigns::{Campaign, CampaignCreate, CampaignPatch, CampaignService},
    rallyhub_catalog::{
        Announcement, Catalog, ChatMessage, Guild, GuildMember, LeaderboardEntry, StoreApp,
    },
    rallyhub_common::AppKind,
};

use crate::{ApiResult, AppStoreApi, CampaignApi, CommunityApi};

/// Delegates every call to the in-process services, optionally after a fixed
/// artificial delay (off by default). There is no cancellation surface —
/// nothing here runs long enough to abandon.
pub struct LocalApi {
    campaigns: Arc<CampaignService>,
    apps: Arc<AppInstallService>,
    catalog: Arc<Catalog>,
    latency: Option<Duration>,
}

impl LocalApi {
    pub fn new(
        campaigns: Arc<CampaignService>,
        apps: Arc<AppInstallService>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            campaigns,
            apps,
            catalog,
            latency: None,
        }
    }

    /// Add a fixed delay to every call, for exercising loading states.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = (latency > Duration::ZERO).then_some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CampaignApi for LocalApi {
    async fn list_by_guild(&self, guild_id: &str) -> ApiResult<Vec<Campaign>> {
        self.simulate_latency().await;
        Ok(self.campaigns.list_by_guild(guild_id).await)
    }

    async fn active_by_guild_and_kind(
        &self,
        guild_id: &str,
        kind: AppKind,
    ) -> ApiResult<Vec<Campaign>> {
        self.simulate_latency().await;
        Ok(self.campaigns.active_by_guild_and_kind(guild_id, kind).await)
    }

    async fn create(&self, create: CampaignCreate) -> ApiResult<Campaign> {
        self.simulate_latency().await;
        Ok(self.campaigns.create(create).await?)
    }

    async fn update(&self, id: &str, patch: CampaignPatch) -> ApiResult<Campaign> {
        self.simulate_latency().await;
        Ok(self.campaigns.update(id, patch).await?)
    }

    async fn remove(&self, id: &str) -> ApiResult<()> {
        self.simulate_latency().await;
        Ok(self.campaigns.remove(id).await?)
    }
}

#[async_trait]
impl AppStoreApi for LocalApi {
    async fn catalog_apps(&self) -> ApiResult<Vec<StoreApp>> {
        self.simulate_latency().await;
        Ok(self.catalog.store_apps().to_vec())
    }

    async fn install(
        &self,
        guild_id: &str,
        app_id: &str,
        user_id: &str,
    ) -> ApiResult<InstalledApp> {
        self.simulate_latency().await;
        Ok(self.apps.install(guild_id, app_id, user_id).await?)
    }

    async fn uninstall(&self, guild_id: &str, app_id: &str) -> ApiResult<bool> {
        self.simulate_latency().await;
        Ok(self.apps.uninstall(guild_id, app_id).await)
    }

    async fn is_installed(&self, guild_id: &str, app_id: &str) -> ApiResult<bool> {
        self.simulate_latency().await;
        Ok(self.apps.is_installed(guild_id, app_id).await)
    }

    async fn installed_apps(&self, guild_id: &str) -> ApiResult<Vec<InstalledApp>> {
        self.simulate_latency().await;
        Ok(self.apps.list_installed(guild_id).await)
    }
}

#[async_trait]
impl CommunityApi for LocalApi {
    async fn guilds(&self) -> ApiResult<Vec<Guild>> {
        self.simulate_latency().await;
        Ok(self.catalog.guilds().to_vec())
    }

    async fn guild(&self, guild_id: &str) -> ApiResult<Option<Guild>> {
        self.simulate_latency().await;
        Ok(self.catalog.guild_by_id(guild_id).cloned())
    }

    async fn members(&self, guild_id: &str) -> ApiResult<Vec<GuildMember>> {
        self.simulate_latency().await;
        Ok(self
            .catalog
            .members_of(guild_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn announcements(&self, guild_id: &str) -> ApiResult<Vec<Announcement>> {
        self.simulate_latency().await;
        Ok(self
            .catalog
            .announcements_for(guild_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn chat_messages(&self, guild_id: &str) -> ApiResult<Vec<ChatMessage>> {
        self.simulate_latency().await;
        Ok(self
            .catalog
            .chat_messages_for(guild_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        self.simulate_latency().await;
        Ok(self.catalog.leaderboard().to_vec())
    }
}
