//! Configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level `rallyhub.toml` contents. Every field has a default so an empty
/// file (or none at all) is valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RallyhubConfig {
    /// Overrides the platform data directory for record files.
    pub data_dir: Option<PathBuf>,
    pub persistence: PersistenceConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// When off, stores run in-memory only and nothing touches disk.
    pub enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Fixed artificial delay added to every facade call. Off at 0.
    pub simulated_latency_ms: u64,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: RallyhubConfig = toml::from_str("").unwrap();
        assert_eq!(config, RallyhubConfig::default());
        assert!(config.persistence.enabled);
        assert_eq!(config.api.simulated_latency_ms, 0);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: RallyhubConfig = toml::from_str(
            r#"
            data_dir = "/tmp/rallyhub"

            [api]
            simulated_latency_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/rallyhub".as_ref()));
        assert_eq!(config.api.simulated_latency_ms, 150);
        assert!(config.persistence.enabled);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RallyhubConfig {
            data_dir: Some("/var/lib/rallyhub".into()),
            persistence: PersistenceConfig { enabled: false },
            api: ApiConfig {
                simulated_latency_ms: 40,
            },
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: RallyhubConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config, back);
    }
}
