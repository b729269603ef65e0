//! The campaign store: lazy hydration, CRUD, queries, change notification.

use std::{collections::HashMap, sync::Arc};

use {
    chrono::Utc,
    rallyhub_common::{AppKind, ChangeNotifier, Subscription},
    rallyhub_persist::RecordStore,
    tokio::sync::{OnceCell, RwLock},
    tracing::{info, warn},
};

use crate::{
    Error, Result,
    types::{Campaign, CampaignCreate, CampaignPatch},
};

/// In-memory authoritative campaign map over a best-effort persistence
/// backend.
///
/// Hydration is lazy and idempotent: the first operation of any kind merges
/// persisted records with the seed set (a seed enters only when no persisted
/// record shares its id) — callers never have to sequence an init call.
/// Every successful mutation commits to memory, persists best-effort, then
/// notifies subscribers, in that order.
pub struct CampaignService {
    store: Arc<dyn RecordStore<Campaign>>,
    seeds: Vec<Campaign>,
    campaigns: RwLock<HashMap<String, Campaign>>,
    hydrated: OnceCell<()>,
    notifier: Arc<ChangeNotifier>,
}

impl CampaignService {
    pub fn new(store: Arc<dyn RecordStore<Campaign>>, seeds: Vec<Campaign>) -> Self {
        Self {
            store,
            seeds,
            campaigns: RwLock::new(HashMap::new()),
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
                        warn!(error = %e, "campaign storage unavailable, starting from seeds");
                        Vec::new()
                    },
                };
                let mut map = HashMap::with_capacity(persisted.len() + self.seeds.len());
                for campaign in persisted {
                    map.insert(campaign.id.clone(), campaign);
                }
                for seed in &self.seeds {
                    map.entry(seed.id.clone()).or_insert_with(|| seed.clone());
                }
                info!(count = map.len(), "campaigns hydrated");
                *self.campaigns.write().await = map;
            })
            .await;
    }

    // ── Reads (never error; absent data yields empty results) ───────────────

    pub async fn list(&self) -> Vec<Campaign> {
        self.ensure_hydrated().await;
        let campaigns = self.campaigns.read().await;
        sorted(campaigns.values().cloned().collect())
    }

    pub async fn list_by_guild(&self, guild_id: &str) -> Vec<Campaign> {
        self.ensure_hydrated().await;
        let campaigns = self.campaigns.read().await;
        sorted(
            campaigns
                .values()
                .filter(|c| c.guild_id == guild_id)
                .cloned()
                .collect(),
        )
    }

    pub async fn get(&self, id: &str) -> Option<Campaign> {
        self.ensure_hydrated().await;
        self.campaigns.read().await.get(id).cloned()
    }

    /// Campaigns of `kind` in `guild_id` whose lifecycle window contains the
    /// current time.
    pub async fn active_by_guild_and_kind(&self, guild_id: &str, kind: AppKind) -> Vec<Campaign> {
        self.ensure_hydrated().await;
        let now = Utc::now();
        let campaigns = self.campaigns.read().await;
        sorted(
            campaigns
                .values()
                .filter(|c| c.guild_id == guild_id && c.kind == kind && c.is_active_at(now))
                .cloned()
                .collect(),
        )
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    pub async fn create(&self, create: CampaignCreate) -> Result<Campaign> {
        self.ensure_hydrated().await;
        validate_create(&create)?;

        let now = Utc::now();
        let campaign = Campaign {
            id: uuid::Uuid::new_v4().to_string(),
            guild_id: create.guild_id,
            kind: create.kind,
            name: create.name,
            description: create.description,
            reward_pool: create.reward_pool,
            per_winner_reward: create.per_winner_reward,
            winners: create.winners,
            token: create.token,
            starts_at: create.starts_at.unwrap_or(now),
            ends_at: create.ends_at,
            participants: 0,
            config: create.config,
            created_at: now,
            updated_at: now,
        };

        {
            let mut campaigns = self.campaigns.write().await;
            campaigns.insert(campaign.id.clone(), campaign.clone());
        }
        self.persist(&campaign).await;
        self.notifier.notify();
        info!(id = %campaign.id, guild = %campaign.guild_id, "campaign created");
        Ok(campaign)
    }

    pub async fn update(&self, id: &str, patch: CampaignPatch) -> Result<Campaign> {
        self.ensure_hydrated().await;
        validate_patch(&patch)?;

        let updated = {
            let mut campaigns = self.campaigns.write().await;
            let campaign = campaigns
                .get_mut(id)
                .ok_or_else(|| Error::not_found(id))?;

            if let Some(name) = patch.name {
                campaign.name = name;
            }
            if let Some(description) = patch.description {
                campaign.description = description;
            }
            if let Some(reward_pool) = patch.reward_pool {
                campaign.reward_pool = reward_pool;
            }
            if let Some(per_winner_reward) = patch.per_winner_reward {
                campaign.per_winner_reward = per_winner_reward;
            }
            if let Some(winners) = patch.winners {
                campaign.winners = winners;
            }
            if let Some(token) = patch.token {
                campaign.token = token;
            }
            if let Some(starts_at) = patch.starts_at {
                campaign.starts_at = starts_at;
            }
            if let Some(ends_at) = patch.ends_at {
                campaign.ends_at = Some(ends_at);
            }
            if let Some(participants) = patch.participants {
                campaign.participants = participants;
            }
            if let Some(config) = patch.config {
                campaign.config = Some(config);
            }
            campaign.updated_at = Utc::now();
            campaign.clone()
        };

        self.persist(&updated).await;
        self.notifier.notify();
        Ok(updated)
    }

    /// Remove a campaign. Removing an unknown id surfaces
    /// [`Error::NotFound`], consistent with [`update`](Self::update).
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.ensure_hydrated().await;
        {
            let mut campaigns = self.campaigns.write().await;
            if campaigns.remove(id).is_none() {
                return Err(Error::not_found(id));
            }
        }
        // A seed that was never persisted legitimately misses here.
        match self.store.remove(id).await {
            Ok(()) | Err(rallyhub_persist::Error::NotFound { .. }) => {},
            Err(e) => warn!(id, error = %e, "failed to remove persisted campaign"),
        }
        self.notifier.notify();
        info!(id, "campaign removed");
        Ok(())
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

    /// Memory is authoritative; storage failures are logged, never surfaced.
    async fn persist(&self, campaign: &Campaign) {
        if let Err(e) = self.store.upsert(campaign).await {
            warn!(id = %campaign.id, error = %e, "failed to persist campaign");
        }
    }
}

fn sorted(mut campaigns: Vec<Campaign>) -> Vec<Campaign> {
    campaigns.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    campaigns
}

fn validate_create(create: &CampaignCreate) -> Result<()> {
    if create.name.trim().is_empty() {
        return Err(Error::invalid("name", "must not be empty"));
    }
    if create.guild_id.trim().is_empty() {
        return Err(Error::invalid("guildId", "must not be empty"));
    }
    validate_economics(
        Some(create.reward_pool),
        Some(create.per_winner_reward),
        Some(create.winners),
    )
}

fn validate_patch(patch: &CampaignPatch) -> Result<()> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(Error::invalid("name", "must not be empty"));
    }
    validate_economics(patch.reward_pool, patch.per_winner_reward, patch.winners)
}

fn validate_economics(
    reward_pool: Option<f64>,
    per_winner_reward: Option<f64>,
    winners: Option<u32>,
) -> Result<()> {
    if reward_pool.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(Error::invalid("rewardPool", "must be a non-negative amount"));
    }
    if per_winner_reward.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(Error::invalid(
            "perWinnerReward",
            "must be a non-negative amount",
        ));
    }
    if winners.is_some_and(|w| w == 0) {
        return Err(Error::invalid("winners", "must be at least 1"));
    }
    Ok(())
}
