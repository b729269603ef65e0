//! The per-guild read/merge facade consumed by front ends.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use {
    rallyhub_apps::{AppInstallService, InstalledApp},
    rallyhub_catalog::{Guild, GuildMember},
    rallyhub_common::{GuildRole, Subscription},
};

use crate::types::AppCustomization;

/// Composition layer for one guild: profile, members, and the caller's role
/// (all supplied by the constructor), plus transient cosmetic customizations
/// over the installation store's merged app lists.
///
/// Not a store. Derived lists are recomputed from the installation store on
/// every call — pure functions of (guild id, store snapshot version) with no
/// caching that could go stale. Consumers subscribe through
/// [`subscribe`](Self::subscribe) to recompute exactly when the store
/// mutates. Customizations live only as long as the context.
pub struct GuildContext {
    guild: Guild,
    members: Vec<GuildMember>,
    role: GuildRole,
    apps: Arc<AppInstallService>,
    customizations: RwLock<HashMap<String, AppCustomization>>,
}

impl GuildContext {
    pub fn new(
        guild: Guild,
        members: Vec<GuildMember>,
        role: GuildRole,
        apps: Arc<AppInstallService>,
    ) -> Self {
        Self {
            guild,
            members,
            role,
            apps,
            customizations: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn guild(&self) -> &Guild {
        &self.guild
    }

    #[must_use]
    pub fn members(&self) -> &[GuildMember] {
        &self.members
    }

    #[must_use]
    pub fn role(&self) -> GuildRole {
        self.role
    }

    #[must_use]
    pub fn can_manage_apps(&self) -> bool {
        self.role.can_manage_apps()
    }

    // ── Customizations ───────────────────────────────────────────────────────

    /// Save (overwrite) the customization for an app.
    pub fn set_customization(&self, app_id: &str, customization: AppCustomization) {
        self.lock_customizations()
            .insert(app_id.to_string(), customization);
    }

    #[must_use]
    pub fn customization(&self, app_id: &str) -> Option<AppCustomization> {
        self.read_customizations().get(app_id).cloned()
    }

    /// `app` unchanged when no customization record exists; otherwise a copy
    /// with the record's non-empty fields applied.
    #[must_use]
    pub fn customized_app(&self, app: &InstalledApp) -> InstalledApp {
        match self.read_customizations().get(&app.id) {
            Some(customization) => customization.apply(app),
            None => app.clone(),
        }
    }

    // ── Derived app lists ────────────────────────────────────────────────────

    /// Seed + dynamic apps for this guild, customized.
    pub async fn installed_apps(&self) -> Vec<InstalledApp> {
        let apps = self.apps.list_installed(&self.guild.id).await;
        apps.iter().map(|a| self.customized_app(a)).collect()
    }

    /// Dynamically installed apps only, customized.
    pub async fn installed_store_apps(&self) -> Vec<InstalledApp> {
        let apps = self.apps.installed_store_apps(&self.guild.id).await;
        apps.iter().map(|a| self.customized_app(a)).collect()
    }

    // ── Installation-store passthrough ───────────────────────────────────────

    /// Recompute signal: fires when the installation store mutates.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.apps.subscribe(listener)
    }

    /// The installation store's snapshot version.
    #[must_use]
    pub fn snapshot_version(&self) -> u64 {
        self.apps.snapshot_version()
    }

    fn lock_customizations(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, AppCustomization>> {
        self.customizations.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_customizations(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, AppCustomization>> {
        self.customizations.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        chrono::Utc,
        rallyhub_catalog::{Catalog, StoreApp},
        rallyhub_common::AppKind,
        rallyhub_persist::MemoryStore,
    };

    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::empty()
                .with_store_app(StoreApp {
                    id: "app-board".into(),
                    kind: AppKind::SocialTasks,
                    name: "Task Board".into(),
                    description: "Point-scored tasks".into(),
                    icon: "✅".into(),
                    color: "#0984e3".into(),
                })
                .with_store_app(StoreApp {
                    id: "app-clips".into(),
                    kind: AppKind::Clipping,
                    name: "ClipRush".into(),
                    description: "Clip bounties".into(),
                    icon: "🎬".into(),
                    color: "#e17055".into(),
                })
                .with_seed_install("g1", "app-board"),
        )
    }

    fn guild() -> Guild {
        Guild {
            id: "g1".into(),
            name: "Nova Creators".into(),
            description: String::new(),
            icon: "🌟".into(),
            member_count: 1,
            created_at: Utc::now(),
        }
    }

    fn context() -> GuildContext {
        let apps = Arc::new(AppInstallService::new(
            catalog(),
            Arc::new(MemoryStore::new()),
        ));
        GuildContext::new(guild(), Vec::new(), GuildRole::Admin, apps)
    }

    #[tokio::test]
    async fn test_customization_layers_over_merged_list() {
        let ctx = context();
        ctx.set_customization(
            "app-board",
            AppCustomization {
                name: Some("Quests".into()),
                ..AppCustomization::default()
            },
        );

        let apps = ctx.installed_apps().await;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "Quests");
        // Fields without overrides come straight from the seed app.
        assert_eq!(apps[0].icon, "✅");
    }

    #[tokio::test]
    async fn test_derived_lists_track_store_mutations() {
        let ctx = context();
        assert_eq!(ctx.installed_apps().await.len(), 1);
        let version = ctx.snapshot_version();

        ctx.apps.install("g1", "app-clips", "u1").await.unwrap();

        // No caching: the next read reflects the mutation, and the version
        // moved so subscribers knew to recompute.
        assert_eq!(ctx.installed_apps().await.len(), 2);
        assert_eq!(ctx.installed_store_apps().await.len(), 1);
        assert!(ctx.snapshot_version() > version);
    }

    #[tokio::test]
    async fn test_customizations_are_scoped_to_context_lifetime() {
        let apps = Arc::new(AppInstallService::new(
            catalog(),
            Arc::new(MemoryStore::new()),
        ));
        let ctx = GuildContext::new(guild(), Vec::new(), GuildRole::Member, Arc::clone(&apps));
        ctx.set_customization(
            "app-board",
            AppCustomization {
                icon: Some("🧭".into()),
                ..AppCustomization::default()
            },
        );
        assert!(ctx.customization("app-board").is_some());

        // A rebuilt context starts clean even over the same store.
        let rebuilt = GuildContext::new(guild(), Vec::new(), GuildRole::Member, apps);
        assert!(rebuilt.customization("app-board").is_none());
    }

    #[tokio::test]
    async fn test_role_gates_management() {
        let apps = Arc::new(AppInstallService::new(
            catalog(),
            Arc::new(MemoryStore::new()),
        ));
        let admin = GuildContext::new(guild(), Vec::new(), GuildRole::Admin, Arc::clone(&apps));
        let member = GuildContext::new(guild(), Vec::new(), GuildRole::Member, apps);
        assert!(admin.can_manage_apps());
        assert!(!member.can_manage_apps());
    }
}
