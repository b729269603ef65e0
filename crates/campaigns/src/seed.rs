//! Seed campaigns merged into the store at first hydration.
//!
//! Ids are fixed so a persisted record with the same id wins over the seed on
//! later runs. Lifecycle windows are relative to process start to keep the
//! demo dataset browsable.

use {
    chrono::{Duration, Utc},
    rallyhub_common::AppKind,
};

use crate::types::{Campaign, CampaignConfig, Distribution, SocialTask};

#[must_use]
pub fn seed_campaigns() -> Vec<Campaign> {
    let now = Utc::now();

    vec![
        Campaign {
            id: "camp-mindshare-s2".into(),
            guild_id: "g-nova".into(),
            kind: AppKind::InfoFi,
            name: "Mindshare Season 2".into(),
            description: "Top voices on the launch narrative split the pool.".into(),
            reward_pool: 25_000.0,
            per_winner_reward: 500.0,
            winners: 50,
            token: "USDC".into(),
            starts_at: now - Duration::days(7),
            ends_at: Some(now + Duration::days(21)),
            participants: 312,
            config: Some(CampaignConfig::InfoFi {
                tracked_tags: vec!["$RALLY".into(), "#rallyhub".into()],
            }),
            created_at: now - Duration::days(9),
            updated_at: now - Duration::days(7),
        },
        Campaign {
            id: "camp-clip-blitz".into(),
            guild_id: "g-pulse".into(),
            kind: AppKind::Clipping,
            name: "Clip Blitz".into(),
            description: "Best cuts from the weekend marathon stream.".into(),
            reward_pool: 4_000.0,
            per_winner_reward: 200.0,
            winners: 20,
            token: "USDC".into(),
            starts_at: now - Duration::days(2),
            ends_at: Some(now + Duration::days(5)),
            participants: 87,
            config: Some(CampaignConfig::Clipping {
                source_url: "https://vods.rallyhub.gg/pulse/marathon".into(),
                min_duration_secs: Some(20),
            }),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::days(2),
        },
        Campaign {
            id: "camp-launch-tasks".into(),
            guild_id: "g-nova".into(),
            kind: AppKind::SocialTasks,
            name: "Launch Week Tasks".into(),
            description: "Evergreen onboarding tasks, no end date.".into(),
            reward_pool: 1_500.0,
            per_winner_reward: 15.0,
            winners: 100,
            token: "RALLY".into(),
            starts_at: now - Duration::days(14),
            ends_at: None,
            participants: 201,
            config: Some(CampaignConfig::SocialTasks {
                tasks: vec![
                    SocialTask {
                        label: "Follow the guild account".into(),
                        points: 5,
                    },
                    SocialTask {
                        label: "Quote the launch post".into(),
                        points: 10,
                    },
                    SocialTask {
                        label: "Join the community call".into(),
                        points: 25,
                    },
                ],
                distribution: Distribution::EvenSplit,
            }),
            created_at: now - Duration::days(14),
            updated_at: now - Duration::days(14),
        },
    ]
}
