//! Per-guild app installations over best-effort persistence.
//!
//! Two sources of truth per guild: seed apps from the catalog and dynamic
//! installation records owned here. Queries merge them with seed entries
//! taking precedence per app kind.

pub mod error;
pub mod service;
pub mod types;

pub use {
    error::{Error, Result},
    service::AppInstallService,
    types::{AppInstall, InstalledApp},
};
