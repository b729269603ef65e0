//! Config file discovery and path resolution.

use std::path::{Path, PathBuf};

use {
    thiserror::Error,
    tracing::{debug, warn},
};

use crate::schema::RallyhubConfig;

const CONFIG_FILENAME: &str = "rallyhub.toml";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Load config from an explicit path.
pub fn load_config(path: &Path) -> Result<RallyhubConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Discover and load config from standard locations.
///
/// Search order: `./rallyhub.toml`, then the user config dir. No file means
/// defaults; an unreadable file logs a warning and falls back to defaults.
#[must_use]
pub fn discover_and_load() -> RallyhubConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return RallyhubConfig::default();
    };
    debug!(path = %path.display(), "loading config");
    match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            RallyhubConfig::default()
        },
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }
    let global = config_dir()?.join(CONFIG_FILENAME);
    global.exists().then_some(global)
}

/// The user-global config directory (`~/.config/rallyhub/` on Linux).
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rallyhub").map(|d| d.config_dir().to_path_buf())
}

/// Where record files live: the configured override, else the platform data
/// dir, else `./.rallyhub` as a last resort.
#[must_use]
pub fn data_dir(config: &RallyhubConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    directories::ProjectDirs::from("", "", "rallyhub")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".rallyhub"))
}

#[must_use]
pub fn campaigns_path(config: &RallyhubConfig) -> PathBuf {
    data_dir(config).join("campaigns.json")
}

#[must_use]
pub fn installs_path(config: &RallyhubConfig) -> PathBuf {
    data_dir(config).join("installs.json")
}
