//! Configuration discovery and data-dir resolution.
//!
//! One optional `rallyhub.toml`, checked project-local then user-global.
//! A missing file means defaults; an unreadable one logs a warning and
//! falls back to defaults rather than failing startup.

pub mod loader;
pub mod schema;

pub use {
    loader::{
        Error, Result, campaigns_path, config_dir, data_dir, discover_and_load, installs_path,
        load_config,
    },
    schema::{ApiConfig, PersistenceConfig, RallyhubConfig},
};
