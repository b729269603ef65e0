//! Demo authentication: one hardcoded user, always signed in.

use {rallyhub_catalog::{Catalog, User}, tracing::debug};

const DEMO_USER_ID: &str = "u-mira";

/// Session wrapper exposing the fixed demo user as authenticated. The seam a
/// real identity provider would replace.
pub struct AuthSession {
    user: User,
}

impl AuthSession {
    /// Resolve the demo user from the catalog, synthesizing one when the
    /// catalog has no users at all.
    #[must_use]
    pub fn demo(catalog: &Catalog) -> Self {
        let user = catalog
            .user_by_id(DEMO_USER_ID)
            .cloned()
            .unwrap_or_else(|| {
                debug!("demo user missing from catalog, synthesizing");
                User {
                    id: DEMO_USER_ID.into(),
                    handle: "mira".into(),
                    display_name: "Mira Chen".into(),
                    avatar: "🦊".into(),
                }
            });
        Self { user }
    }

    #[must_use]
    pub fn current_user(&self) -> &User {
        &self.user
    }

    /// Always true in the demo build.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        true
    }
}
