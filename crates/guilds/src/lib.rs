//! Per-guild composition: static profile, members, caller role, and cosmetic
//! app customizations layered over the installation store's merged lists.

pub mod context;
pub mod types;

pub use {context::GuildContext, types::AppCustomization};
