//! Cosmetic per-app customization.

use {rallyhub_apps::InstalledApp, serde::{Deserialize, Serialize}};

/// Per-guild, per-app override of the rendered icon/name/description.
///
/// Held in transient context state only — it does not survive a context
/// rebuild. Saving overwrites the whole record; an absent or empty field
/// falls back to the app's own value, never to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppCustomization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AppCustomization {
    /// Shallow copy of `app` with non-empty override fields applied.
    #[must_use]
    pub fn apply(&self, app: &InstalledApp) -> InstalledApp {
        let mut out = app.clone();
        if let Some(icon) = non_empty(&self.icon) {
            out.icon = icon.to_owned();
        }
        if let Some(name) = non_empty(&self.name) {
            out.name = name.to_owned();
        }
        if let Some(description) = non_empty(&self.description) {
            out.description = description.to_owned();
        }
        out
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rallyhub_common::AppKind;

    use super::*;

    fn app() -> InstalledApp {
        InstalledApp {
            id: "app-board".into(),
            kind: AppKind::SocialTasks,
            name: "Task Board".into(),
            description: "Point-scored tasks".into(),
            icon: "✅".into(),
            color: "#0984e3".into(),
            installed_at: None,
        }
    }

    #[test]
    fn test_default_customization_is_identity() {
        let app = app();
        assert_eq!(AppCustomization::default().apply(&app), app);
    }

    #[test]
    fn test_name_only_override_keeps_other_fields() {
        let app = app();
        let customization = AppCustomization {
            name: Some("Quests".into()),
            ..AppCustomization::default()
        };
        let out = customization.apply(&app);
        assert_eq!(out.name, "Quests");
        assert_eq!(out.icon, app.icon);
        assert_eq!(out.description, app.description);
    }

    #[test]
    fn test_empty_override_fields_fall_back() {
        let app = app();
        let customization = AppCustomization {
            icon: Some(String::new()),
            name: Some("   ".into()),
            description: Some("Custom".into()),
        };
        let out = customization.apply(&app);
        assert_eq!(out.icon, app.icon);
        assert_eq!(out.name, app.name);
        assert_eq!(out.description, "Custom");
    }
}
