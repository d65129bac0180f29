//! [`ActivityLog`] read models.

use crate::domain::{user, ActivityLog};

/// [`ActivityLog`] entry along with the [`User`] who triggered it.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct WithUser {
    /// [`ActivityLog`] entry itself.
    pub entry: ActivityLog,

    /// Displayed [`Name`] of the triggering [`User`], if known.
    ///
    /// [`Name`]: user::Name
    /// [`User`]: crate::domain::User
    pub name: Option<user::Name>,
}

/// Selector of an [`ActivityLog`] listing.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    /// Maximum number of entries to return.
    pub limit: i64,
}

impl Default for Selector {
    fn default() -> Self {
        Self { limit: 10 }
    }
}
