//! Guild-scoped reward campaigns over best-effort persistence.
//!
//! The in-memory map is authoritative. It hydrates lazily on first use from
//! the persistence backend merged with seed campaigns, and every successful
//! mutation persists best-effort, then notifies subscribers.

pub mod error;
pub mod seed;
pub mod service;
pub mod types;

pub use {
    error::{Error, Result},
    service::CampaignService,
    types::{
        Campaign, CampaignConfig, CampaignCreate, CampaignPatch, CampaignStatus, Distribution,
        SocialTask,
    },
};
