//! The app installation store: idempotent installs, merged queries, change
//! notification.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use {
    chrono::Utc,
    rallyhub_catalog::Catalog,
    rallyhub_common::{ChangeNotifier, Subscription},
    rallyhub_persist::{Keyed, RecordStore},
    tokio::sync::{OnceCell, RwLock},
    tracing::{debug, info, warn},
};

use crate::{
    Error, Result,
    types::{AppInstall, InstalledApp},
};

/// In-memory authoritative map of dynamic installations, keyed by guild, over
/// a best-effort persistence backend.
///
/// Independent of the campaign store: its own listener set, its own snapshot
/// counter. Hydration is lazy and idempotent, as there: the first operation
/// of any kind loads persisted records; callers never sequence an init call.
pub struct AppInstallService {
    catalog: Arc<Catalog>,
    store: Arc<dyn RecordStore<AppInstall>>,
    installs: RwLock<HashMap<String, Vec<AppInstall>>>,
    hydrated: OnceCell<()>,
    notifier: Arc<ChangeNotifier>,
}

impl AppInstallService {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn RecordStore<AppInstall>>) -> Self {
        Self {
            catalog,
            store,
            installs: RwLock::new(HashMap::new()),
            hydrated: OnceCell::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Force hydration now instead of on first use. Idempotent.
    pub async fn initialize(&self) {
        self.ensure_hydrated().await;
    }

    async fn ensure_hydrated(&self) {
        self.hydrated
            .get_or_init(|| async {
                let persisted = match self.store.load().await {
                    Ok(records) => records,
                    Err(e) => {
                        warn!(error = %e, "install storage unavailable, starting empty");
                        Vec::new()
                    },
                };
                let mut by_guild: HashMap<String, Vec<AppInstall>> = HashMap::new();
                for install in persisted {
                    by_guild
                        .entry(install.guild_id.clone())
                        .or_default()
                        .push(install);
                }
                info!(guilds = by_guild.len(), "app installs hydrated");
                *self.installs.write().await = by_guild;
            })
            .await;
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Install a store-catalog app into a guild.
    ///
    /// Unknown `app_id` surfaces [`Error::NotFound`] without creating a record
    /// or notifying. Re-installing an already-installed app returns the
    /// existing derived view unchanged — no new record, no version bump.
    pub async fn install(
        &self,
        guild_id: &str,
        app_id: &str,
        user_id: &str,
    ) -> Result<InstalledApp> {
        self.ensure_hydrated().await;
        let app = self
            .catalog
            .store_app_by_id(app_id)
            .ok_or_else(|| Error::not_found(app_id))?
            .clone();

        let install = {
            let mut installs = self.installs.write().await;
            let list = installs.entry(guild_id.to_string()).or_default();
            if let Some(existing) = list.iter().find(|i| i.app_id == app_id) {
                debug!(guild = guild_id, app = app_id, "app already installed");
                return Ok(InstalledApp::from_install(&app, existing));
            }
            let install = AppInstall {
                guild_id: guild_id.into(),
                app_id: app_id.into(),
                installed_by: user_id.into(),
                installed_at: Utc::now(),
            };
            list.push(install.clone());
            install
        };

        self.persist(&install).await;
        self.notifier.notify();
        info!(guild = guild_id, app = app_id, by = user_id, "app installed");
        Ok(InstalledApp::from_install(&app, &install))
    }

    /// Remove a dynamic installation. Returns whether anything was removed;
    /// subscribers are notified only when something was.
    pub async fn uninstall(&self, guild_id: &str, app_id: &str) -> bool {
        self.ensure_hydrated().await;

        let removed = {
            let mut installs = self.installs.write().await;
            match installs.get_mut(guild_id) {
                Some(list) => {
                    let before = list.len();
                    list.retain(|i| i.app_id != app_id);
                    list.len() != before
                },
                None => false,
            }
        };

        if removed {
            let key = AppInstall::pair_key(guild_id, app_id);
            match self.store.remove(&key).await {
                Ok(()) | Err(rallyhub_persist::Error::NotFound { .. }) => {},
                Err(e) => warn!(guild = guild_id, app = app_id, error = %e, "failed to remove persisted install"),
            }
            self.notifier.notify();
            info!(guild = guild_id, app = app_id, "app uninstalled");
        }
        removed
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Whether the guild has the app, from either source of truth: a dynamic
    /// record OR a seed entry.
    pub async fn is_installed(&self, guild_id: &str, app_id: &str) -> bool {
        self.ensure_hydrated().await;
        if self.catalog.has_seed_install(guild_id, app_id) {
            return true;
        }
        let installs = self.installs.read().await;
        installs
            .get(guild_id)
            .is_some_and(|list| list.iter().any(|i| i.app_id == app_id))
    }

    /// Union of seed apps and dynamic installs, deduplicated by app kind with
    /// seed entries taking precedence. (A dynamic install of a kind the seeds
    /// already cover is therefore invisible here — kept as the source system
    /// behaves, even though it can mask a re-install.)
    pub async fn list_installed(&self, guild_id: &str) -> Vec<InstalledApp> {
        self.ensure_hydrated().await;

        let mut kinds = HashSet::new();
        let mut merged = Vec::new();
        for app in self.catalog.seed_apps_for(guild_id) {
            if kinds.insert(app.kind) {
                merged.push(InstalledApp::from_seed(app));
            }
        }

        let installs = self.installs.read().await;
        for install in Self::by_install_time(installs.get(guild_id)) {
            // Dangling records (app gone from the catalog) are skipped.
            let Some(app) = self.catalog.store_app_by_id(&install.app_id) else {
                continue;
            };
            if kinds.insert(app.kind) {
                merged.push(InstalledApp::from_install(app, install));
            }
        }
        merged
    }

    /// Dynamic installs only, resolved against the catalog, oldest first.
    pub async fn installed_store_apps(&self, guild_id: &str) -> Vec<InstalledApp> {
        self.ensure_hydrated().await;
        let installs = self.installs.read().await;
        Self::by_install_time(installs.get(guild_id))
            .into_iter()
            .filter_map(|install| {
                self.catalog
                    .store_app_by_id(&install.app_id)
                    .map(|app| InstalledApp::from_install(app, install))
            })
            .collect()
    }

    fn by_install_time(list: Option<&Vec<AppInstall>>) -> Vec<&AppInstall> {
        let mut sorted: Vec<&AppInstall> = list.map(|l| l.iter().collect()).unwrap_or_default();
        sorted.sort_by(|a, b| a.installed_at.cmp(&b.installed_at));
        sorted
    }

    // ── Subscription contract ────────────────────────────────────────────────

    /// Register a callback invoked after every successful mutation.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.notifier.subscribe(listener)
    }

    /// Monotonic counter bumped once per successful mutation.
    #[must_use]
    pub fn snapshot_version(&self) -> u64 {
        self.notifier.version()
    }

    async fn persist(&self, install: &AppInstall) {
        if let Err(e) = self.store.upsert(install).await {
            warn!(key = %install.key(), error = %e, "failed to persist install");
        }
    }
}
