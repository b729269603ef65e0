//! Campaign records, lifecycle, and kind-specific configuration.

use {
    chrono::{DateTime, Utc},
    rallyhub_common::AppKind,
    rallyhub_persist::Keyed,
    serde::{Deserialize, Serialize},
};

/// Derived lifecycle state. A campaign is active while the current time falls
/// within `[starts_at, ends_at)`, or always when it has no end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignStatus {
    Active,
    Ended,
}

/// How social-task rewards are split among qualifying participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Distribution {
    #[default]
    EvenSplit,
    Raffle,
    TopScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialTask {
    pub label: String,
    pub points: u32,
}

/// Kind-specific campaign configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CampaignConfig {
    InfoFi {
        tracked_tags: Vec<String>,
    },
    Ugc {
        accepted_formats: Vec<String>,
    },
    Clipping {
        source_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_duration_secs: Option<u32>,
    },
    SocialTasks {
        tasks: Vec<SocialTask>,
        #[serde(default)]
        distribution: Distribution,
    },
    Mini {
        entry_url: String,
    },
}

/// A reward-bearing activity with a lifecycle window and payout economics.
/// Identifiers are unique across the whole store, not per guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub guild_id: String,
    pub kind: AppKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reward_pool: f64,
    pub per_winner_reward: f64,
    pub winners: u32,
    pub token: String,
    pub starts_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CampaignConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> CampaignStatus {
        match self.ends_at {
            None => CampaignStatus::Active,
            Some(end) if self.starts_at <= now && now < end => CampaignStatus::Active,
            Some(_) => CampaignStatus::Ended,
        }
    }

    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == CampaignStatus::Active
    }
}

impl Keyed for Campaign {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Input for creating a campaign. `starts_at` defaults to the creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCreate {
    pub guild_id: String,
    pub kind: AppKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reward_pool: f64,
    pub per_winner_reward: f64,
    pub winners: u32,
    #[serde(default = "default_token")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CampaignConfig>,
}

fn default_token() -> String {
    "USDC".into()
}

/// Partial update: absent fields keep their value. An end date can be set
/// here but not cleared; last write wins, no versioning.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_pool: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_winner_reward: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CampaignConfig>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn campaign(starts_offset_days: i64, ends_offset_days: Option<i64>) -> Campaign {
        let now = Utc::now();
        Campaign {
            id: "c1".into(),
            guild_id: "g1".into(),
            kind: AppKind::InfoFi,
            name: "Launch".into(),
            description: String::new(),
            reward_pool: 1000.0,
            per_winner_reward: 50.0,
            winners: 20,
            token: "USDC".into(),
            starts_at: now + Duration::days(starts_offset_days),
            ends_at: ends_offset_days.map(|d| now + Duration::days(d)),
            participants: 0,
            config: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_active_without_end_date() {
        let c = campaign(-1, None);
        assert_eq!(c.status_at(Utc::now()), CampaignStatus::Active);
    }

    #[test]
    fn test_status_active_inside_window() {
        let c = campaign(-1, Some(1));
        assert!(c.is_active_at(Utc::now()));
    }

    #[test]
    fn test_status_ended_after_window() {
        let c = campaign(-10, Some(-1));
        assert_eq!(c.status_at(Utc::now()), CampaignStatus::Ended);
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let c = campaign(-1, Some(1));
        let end = c.ends_at.unwrap();
        assert_eq!(c.status_at(end), CampaignStatus::Ended);
        assert_eq!(
            c.status_at(end - Duration::seconds(1)),
            CampaignStatus::Active
        );
    }

    #[test]
    fn test_campaign_json_roundtrip() {
        let mut c = campaign(-1, Some(3));
        c.config = Some(CampaignConfig::SocialTasks {
            tasks: vec![SocialTask {
                label: "Quote the launch post".into(),
                points: 10,
            }],
            distribution: Distribution::Raffle,
        });
        let json = serde_json::to_string(&c).unwrap();
        let back: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn test_config_wire_tag() {
        let config = CampaignConfig::InfoFi {
            tracked_tags: vec!["$RALLY".into()],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind"], "infoFi");
    }

    #[test]
    fn test_create_defaults() {
        let json = r#"{
            "guildId": "g1",
            "kind": "infoFi",
            "name": "Launch",
            "rewardPool": 1000,
            "perWinnerReward": 50,
            "winners": 20
        }"#;
        let create: CampaignCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.token, "USDC");
        assert!(create.starts_at.is_none());
        assert!(create.config.is_none());
    }
}
