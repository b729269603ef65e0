//! Installation records and the derived installed-app view.

use {
    chrono::{DateTime, Utc},
    rallyhub_catalog::StoreApp,
    rallyhub_common::AppKind,
    rallyhub_persist::Keyed,
    serde::{Deserialize, Serialize},
};

/// Dynamic installation record pairing a guild with a store-catalog app.
/// At most one record exists per (guild, app) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstall {
    pub guild_id: String,
    pub app_id: String,
    pub installed_by: String,
    pub installed_at: DateTime<Utc>,
}

impl AppInstall {
    #[must_use]
    pub fn pair_key(guild_id: &str, app_id: &str) -> String {
        format!("{guild_id}/{app_id}")
    }
}

impl Keyed for AppInstall {
    fn key(&self) -> String {
        Self::pair_key(&self.guild_id, &self.app_id)
    }
}

/// What consumers render: a seed entry or dynamic install resolved to its
/// display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApp {
    pub id: String,
    pub kind: AppKind,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    /// Absent for seed entries, which have no install event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,
}

impl InstalledApp {
    #[must_use]
    pub fn from_seed(app: &StoreApp) -> Self {
        Self {
            id: app.id.clone(),
            kind: app.kind,
            name: app.name.clone(),
            description: app.description.clone(),
            icon: app.icon.clone(),
            color: app.color.clone(),
            installed_at: None,
        }
    }

    #[must_use]
    pub fn from_install(app: &StoreApp, install: &AppInstall) -> Self {
        Self {
            installed_at: Some(install.installed_at),
            ..Self::from_seed(app)
        }
    }
}
