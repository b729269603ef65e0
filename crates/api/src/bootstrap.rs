//! Wire a local platform from configuration.

use std::{sync::Arc, time::Duration};

use {
    rallyhub_apps::{AppInstall, AppInstallService},
    rallyhub_campaigns::{Campaign, CampaignService, seed::seed_campaigns},
    rallyhub_catalog::Catalog,
    rallyhub_common::GuildRole,
    rallyhub_config::RallyhubConfig,
    rallyhub_guilds::GuildContext,
    rallyhub_persist::{JsonFileStore, NullStore, RecordStore},
    tracing::info,
};

use crate::{auth::AuthSession, local::LocalApi};

/// A fully wired local platform: catalog, stores, facade, and session.
pub struct Platform {
    pub catalog: Arc<Catalog>,
    pub campaigns: Arc<CampaignService>,
    pub apps: Arc<AppInstallService>,
    pub api: Arc<LocalApi>,
    pub auth: AuthSession,
}

/// Build the platform. With persistence disabled the stores run over
/// [`NullStore`] and nothing touches disk.
#[must_use]
pub fn build(config: &RallyhubConfig) -> Platform {
    let catalog = Catalog::builtin();

    let campaign_store: Arc<dyn RecordStore<Campaign>> = if config.persistence.enabled {
        Arc::new(JsonFileStore::new(rallyhub_config::campaigns_path(config)))
    } else {
        Arc::new(NullStore::new())
    };
    let install_store: Arc<dyn RecordStore<AppInstall>> = if config.persistence.enabled {
        Arc::new(JsonFileStore::new(rallyhub_config::installs_path(config)))
    } else {
        Arc::new(NullStore::new())
    };

    let campaigns = Arc::new(CampaignService::new(campaign_store, seed_campaigns()));
    let apps = Arc::new(AppInstallService::new(Arc::clone(&catalog), install_store));

    let mut api = LocalApi::new(
        Arc::clone(&campaigns),
        Arc::clone(&apps),
        Arc::clone(&catalog),
    );
    let latency_ms = config.api.simulated_latency_ms;
    if latency_ms > 0 {
        api = api.with_latency(Duration::from_millis(latency_ms));
    }
    let auth = AuthSession::demo(&catalog);

    info!(
        persistence = config.persistence.enabled,
        latency_ms, "platform wired"
    );

    Platform {
        catalog,
        campaigns,
        apps,
        api: Arc::new(api),
        auth,
    }
}

impl Platform {
    /// Composition context for one guild, with the current user's role
    /// resolved from the member list. Unknown guild yields `None`.
    #[must_use]
    pub fn guild_context(&self, guild_id: &str) -> Option<GuildContext> {
        let guild = self.catalog.guild_by_id(guild_id)?.clone();
        let members: Vec<_> = self
            .catalog
            .members_of(guild_id)
            .into_iter()
            .cloned()
            .collect();
        let role = members
            .iter()
            .find(|m| m.user_id == self.auth.current_user().id)
            .map_or(GuildRole::None, |m| m.role);
        Some(GuildContext::new(
            guild,
            members,
            role,
            Arc::clone(&self.apps),
        ))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        rallyhub_campaigns::CampaignCreate,
        rallyhub_common::AppKind,
        rallyhub_config::{PersistenceConfig, RallyhubConfig},
    };

    use super::*;

    fn ephemeral_config() -> RallyhubConfig {
        RallyhubConfig {
            persistence: PersistenceConfig { enabled: false },
            ..RallyhubConfig::default()
        }
    }

    fn launch_create() -> CampaignCreate {
        CampaignCreate {
            guild_id: "g-nova".into(),
            kind: AppKind::InfoFi,
            name: "Launch".into(),
            description: String::new(),
            reward_pool: 1000.0,
            per_winner_reward: 50.0,
            winners: 20,
            token: "USDC".into(),
            starts_at: None,
            ends_at: None,
            config: None,
        }
    }

    #[tokio::test]
    async fn test_guild_context_resolves_current_user_role() {
        let platform = build(&ephemeral_config());

        // u-mira administers g-nova but is not a member of g-pulse.
        let nova = platform.guild_context("g-nova").unwrap();
        assert_eq!(nova.role(), GuildRole::Admin);

        let pulse = platform.guild_context("g-pulse").unwrap();
        assert_eq!(pulse.role(), GuildRole::None);

        assert!(platform.guild_context("ghost").is_none());
    }

    #[tokio::test]
    async fn test_disabled_persistence_is_ephemeral() {
        let config = ephemeral_config();

        let platform = build(&config);
        let seeded = platform.campaigns.list_by_guild("g-nova").await.len();
        platform.campaigns.create(launch_create()).await.unwrap();
        assert_eq!(
            platform.campaigns.list_by_guild("g-nova").await.len(),
            seeded + 1
        );

        // A rebuilt platform starts over from seeds alone.
        let rebuilt = build(&config);
        assert_eq!(rebuilt.campaigns.list_by_guild("g-nova").await.len(), seeded);
    }

    #[tokio::test]
    async fn test_enabled_persistence_survives_rebuild() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = RallyhubConfig {
            data_dir: Some(tmp.path().to_path_buf()),
            ..RallyhubConfig::default()
        };

        let platform = build(&config);
        let created = platform.campaigns.create(launch_create()).await.unwrap();
        platform
            .apps
            .install("g-forge", "app-arcade", "u-mira")
            .await
            .unwrap();

        let rebuilt = build(&config);
        assert!(rebuilt.campaigns.get(&created.id).await.is_some());
        assert!(rebuilt.apps.is_installed("g-forge", "app-arcade").await);
    }
}
