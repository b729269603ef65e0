//! The catalog handle and the built-in seed dataset.

use std::sync::{Arc, LazyLock};

use {
    chrono::{Duration, Utc},
    rallyhub_common::{AppKind, GuildRole},
};

use crate::types::{
    Announcement, ChatMessage, Guild, GuildMember, LeaderboardEntry, SeedInstall, StoreApp, User,
};

/// Read-only collection of seed datasets.
///
/// Stores and contexts receive a catalog handle at construction so tests can
/// swap in a minimal one; production code uses [`Catalog::builtin`].
pub struct Catalog {
    store_apps: Vec<StoreApp>,
    guilds: Vec<Guild>,
    members: Vec<GuildMember>,
    users: Vec<User>,
    seed_installs: Vec<SeedInstall>,
    announcements: Vec<Announcement>,
    chat_messages: Vec<ChatMessage>,
    leaderboard: Vec<LeaderboardEntry>,
}

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| Arc::new(build_builtin()));

impl Catalog {
    /// The process-wide built-in dataset.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// An empty catalog. Combine with the `with_*` builders in tests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            store_apps: Vec::new(),
            guilds: Vec::new(),
            members: Vec::new(),
            users: Vec::new(),
            seed_installs: Vec::new(),
            announcements: Vec::new(),
            chat_messages: Vec::new(),
            leaderboard: Vec::new(),
        }
    }

    #[must_use]
    pub fn store_apps(&self) -> &[StoreApp] {
        &self.store_apps
    }

    #[must_use]
    pub fn store_app_by_id(&self, app_id: &str) -> Option<&StoreApp> {
        self.store_apps.iter().find(|a| a.id == app_id)
    }

    #[must_use]
    pub fn guilds(&self) -> &[Guild] {
        &self.guilds
    }

    #[must_use]
    pub fn guild_by_id(&self, guild_id: &str) -> Option<&Guild> {
        self.guilds.iter().find(|g| g.id == guild_id)
    }

    #[must_use]
    pub fn members_of(&self, guild_id: &str) -> Vec<&GuildMember> {
        self.members
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .collect()
    }

    #[must_use]
    pub fn user_by_id(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Seed-installed apps of a guild, resolved against the store catalog.
    /// Unresolvable entries (dangling app id) are skipped.
    #[must_use]
    pub fn seed_apps_for(&self, guild_id: &str) -> Vec<&StoreApp> {
        self.seed_installs
            .iter()
            .filter(|s| s.guild_id == guild_id)
            .filter_map(|s| self.store_app_by_id(&s.app_id))
            .collect()
    }

    #[must_use]
    pub fn has_seed_install(&self, guild_id: &str, app_id: &str) -> bool {
        self.seed_installs
            .iter()
            .any(|s| s.guild_id == guild_id && s.app_id == app_id)
    }

    #[must_use]
    pub fn announcements_for(&self, guild_id: &str) -> Vec<&Announcement> {
        self.announcements
            .iter()
            .filter(|a| a.guild_id == guild_id)
            .collect()
    }

    #[must_use]
    pub fn chat_messages_for(&self, guild_id: &str) -> Vec<&ChatMessage> {
        self.chat_messages
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .collect()
    }

    #[must_use]
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    // ── Builders (used by seed construction and tests) ──────────────────────

    #[must_use]
    pub fn with_store_app(mut self, app: StoreApp) -> Self {
        self.store_apps.push(app);
        self
    }

    #[must_use]
    pub fn with_guild(mut self, guild: Guild) -> Self {
        self.guilds.push(guild);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: GuildMember) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    #[must_use]
    pub fn with_seed_install(mut self, guild_id: &str, app_id: &str) -> Self {
        self.seed_installs.push(SeedInstall {
            guild_id: guild_id.into(),
            app_id: app_id.into(),
        });
        self
    }

    #[must_use]
    pub fn with_announcement(mut self, announcement: Announcement) -> Self {
        self.announcements.push(announcement);
        self
    }

    #[must_use]
    pub fn with_chat_message(mut self, message: ChatMessage) -> Self {
        self.chat_messages.push(message);
        self
    }

    #[must_use]
    pub fn with_leaderboard_entry(mut self, entry: LeaderboardEntry) -> Self {
        self.leaderboard.push(entry);
        self
    }
}

fn store_app(id: &str, kind: AppKind, name: &str, description: &str, icon: &str, color: &str) -> StoreApp {
    StoreApp {
        id: id.into(),
        kind,
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        color: color.into(),
    }
}

fn member(guild_id: &str, user_id: &str, display_name: &str, role: GuildRole, days_ago: i64) -> GuildMember {
    GuildMember {
        guild_id: guild_id.into(),
        user_id: user_id.into(),
        display_name: display_name.into(),
        role,
        joined_at: Utc::now() - Duration::days(days_ago),
    }
}

/// Demo dataset. Timestamps are relative to process start so lifecycle
/// windows stay plausible whenever the data is browsed.
fn build_builtin() -> Catalog {
    let now = Utc::now();

    let mut catalog = Catalog::empty()
        .with_store_app(store_app(
            "app-mindshare",
            AppKind::InfoFi,
            "Mindshare Arena",
            "Track narrative mindshare and reward the voices driving it.",
            "📈",
            "#6c5ce7",
        ))
        .with_store_app(store_app(
            "app-studio",
            AppKind::Ugc,
            "Creator Studio",
            "Collect and reward original content submissions.",
            "🎨",
            "#00b894",
        ))
        .with_store_app(store_app(
            "app-cliprush",
            AppKind::Clipping,
            "ClipRush",
            "Bounties for short-form clips cut from long streams.",
            "🎬",
            "#e17055",
        ))
        .with_store_app(store_app(
            "app-taskboard",
            AppKind::SocialTasks,
            "Task Board",
            "Point-scored social tasks with configurable payouts.",
            "✅",
            "#0984e3",
        ))
        .with_store_app(store_app(
            "app-arcade",
            AppKind::Mini,
            "Arcade",
            "Embeddable mini games for community events.",
            "🕹️",
            "#fdcb6e",
        ));

    catalog = catalog
        .with_guild(Guild {
            id: "g-nova".into(),
            name: "Nova Creators".into(),
            description: "Flagship creator collective for launch campaigns.".into(),
            icon: "🌟".into(),
            member_count: 128,
            created_at: now - Duration::days(220),
        })
        .with_guild(Guild {
            id: "g-pulse".into(),
            name: "Pulse Squad".into(),
            description: "Clippers and editors covering live events.".into(),
            icon: "⚡".into(),
            member_count: 54,
            created_at: now - Duration::days(90),
        })
        .with_guild(Guild {
            id: "g-forge".into(),
            name: "Forge Labs".into(),
            description: "Experimental formats and mini-app pilots.".into(),
            icon: "🛠️".into(),
            member_count: 31,
            created_at: now - Duration::days(40),
        });

    catalog = catalog
        .with_user(User {
            id: "u-mira".into(),
            handle: "mira".into(),
            display_name: "Mira Chen".into(),
            avatar: "🦊".into(),
        })
        .with_user(User {
            id: "u-kai".into(),
            handle: "kai".into(),
            display_name: "Kai Moreno".into(),
            avatar: "🐺".into(),
        })
        .with_user(User {
            id: "u-zoe".into(),
            handle: "zoe".into(),
            display_name: "Zoe Park".into(),
            avatar: "🦉".into(),
        })
        .with_user(User {
            id: "u-rio".into(),
            handle: "rio".into(),
            display_name: "Rio Almeida".into(),
            avatar: "🐙".into(),
        });

    catalog = catalog
        .with_member(member("g-nova", "u-mira", "Mira Chen", GuildRole::Admin, 220))
        .with_member(member("g-nova", "u-kai", "Kai Moreno", GuildRole::Moderator, 180))
        .with_member(member("g-nova", "u-zoe", "Zoe Park", GuildRole::Member, 60))
        .with_member(member("g-pulse", "u-kai", "Kai Moreno", GuildRole::Admin, 90))
        .with_member(member("g-pulse", "u-rio", "Rio Almeida", GuildRole::Member, 45))
        .with_member(member("g-forge", "u-zoe", "Zoe Park", GuildRole::Admin, 40));

    catalog = catalog
        .with_seed_install("g-nova", "app-mindshare")
        .with_seed_install("g-nova", "app-taskboard")
        .with_seed_install("g-pulse", "app-cliprush");

    catalog = catalog
        .with_announcement(Announcement {
            id: "ann-1".into(),
            guild_id: "g-nova".into(),
            title: "Season 2 kickoff".into(),
            body: "New mindshare season starts Monday. Pools doubled for week one.".into(),
            posted_at: now - Duration::days(3),
        })
        .with_announcement(Announcement {
            id: "ann-2".into(),
            guild_id: "g-nova".into(),
            title: "Payout schedule".into(),
            body: "Rewards settle every Friday, 18:00 UTC.".into(),
            posted_at: now - Duration::days(10),
        })
        .with_announcement(Announcement {
            id: "ann-3".into(),
            guild_id: "g-pulse".into(),
            title: "Clip quality bar".into(),
            body: "Minimum 720p from now on. Vertical cuts preferred.".into(),
            posted_at: now - Duration::days(1),
        });

    catalog = catalog
        .with_chat_message(ChatMessage {
            id: "msg-1".into(),
            guild_id: "g-nova".into(),
            author_id: "u-kai".into(),
            body: "Launch thread is live, drop your posts below.".into(),
            sent_at: now - Duration::hours(26),
        })
        .with_chat_message(ChatMessage {
            id: "msg-2".into(),
            guild_id: "g-nova".into(),
            author_id: "u-zoe".into(),
            body: "Submitted two clips, waiting on review.".into(),
            sent_at: now - Duration::hours(20),
        })
        .with_chat_message(ChatMessage {
            id: "msg-3".into(),
            guild_id: "g-pulse".into(),
            author_id: "u-rio".into(),
            body: "Stream VOD is up, timestamps in the doc.".into(),
            sent_at: now - Duration::hours(4),
        });

    catalog
        .with_leaderboard_entry(LeaderboardEntry {
            rank: 1,
            user_id: "u-kai".into(),
            display_name: "Kai Moreno".into(),
            points: 12_840,
        })
        .with_leaderboard_entry(LeaderboardEntry {
            rank: 2,
            user_id: "u-zoe".into(),
            display_name: "Zoe Park".into(),
            points: 9_310,
        })
        .with_leaderboard_entry(LeaderboardEntry {
            rank: 3,
            user_id: "u-mira".into(),
            display_name: "Mira Chen".into(),
            points: 7_205,
        })
        .with_leaderboard_entry(LeaderboardEntry {
            rank: 4,
            user_id: "u-rio".into(),
            display_name: "Rio Almeida".into(),
            points: 4_980,
        })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();

        // Every seed install resolves to a real store app and guild.
        for guild in catalog.guilds() {
            for app in catalog.seed_apps_for(&guild.id) {
                assert!(catalog.store_app_by_id(&app.id).is_some());
            }
        }
        // Every member belongs to a known guild and user.
        for guild in catalog.guilds() {
            for m in catalog.members_of(&guild.id) {
                assert!(catalog.user_by_id(&m.user_id).is_some());
            }
        }
    }

    #[test]
    fn test_store_app_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.store_app_by_id("app-taskboard").is_some());
        assert!(catalog.store_app_by_id("app-42").is_none());
    }

    #[test]
    fn test_seed_apps_resolved_for_guild() {
        let catalog = Catalog::builtin();
        let apps = catalog.seed_apps_for("g-nova");
        assert_eq!(apps.len(), 2);
        assert!(catalog.has_seed_install("g-nova", "app-mindshare"));
        assert!(!catalog.has_seed_install("g-forge", "app-mindshare"));
    }

    #[test]
    fn test_dangling_seed_install_is_skipped() {
        let catalog = Catalog::empty().with_seed_install("g1", "app-gone");
        assert!(catalog.seed_apps_for("g1").is_empty());
        // The raw entry still answers has_seed_install; resolution is lazy.
        assert!(catalog.has_seed_install("g1", "app-gone"));
    }

    #[test]
    fn test_community_fixtures_scoped_by_guild() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.announcements_for("g-nova").len(), 2);
        assert_eq!(catalog.announcements_for("g-forge").len(), 0);
        assert_eq!(catalog.chat_messages_for("g-pulse").len(), 1);
        assert!(!catalog.leaderboard().is_empty());
    }
}
