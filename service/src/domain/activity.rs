//! [`ActivityLog`] definitions.

use std::time::Duration;

use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Booking, Testimonial};
use crate::domain::user;

/// Entry of the site-wide activity feed.
#[derive(Clone, Debug)]
pub struct ActivityLog {
    /// ID of this [`ActivityLog`] entry.
    pub id: Id,

    /// ID of the [`User`] who triggered this entry, if any.
    ///
    /// [`User`]: user::User
    pub user_id: Option<user::Id>,

    /// [`Kind`] of the recorded event.
    pub kind: Kind,

    /// Displayed description of the recorded event.
    pub detail: String,

    /// [`DateTime`] when the event happened.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

/// ID of an [`ActivityLog`] entry.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Kind of an [`ActivityLog`] event."]
    enum Kind {
        #[doc = "A [`User`] registered an account."]
        Registration = 1,

        #[doc = "A [`Booking`] was placed."]
        BookingPlaced = 2,

        #[doc = "A [`Booking`] status was changed by an administrator."]
        BookingUpdated = 3,

        #[doc = "A [`Testimonial`] was left."]
        TestimonialLeft = 4,
    }
}

/// Renders the given `age` of an [`ActivityLog`] entry as a human-readable
/// relative phrase (`just now`, `5 minutes ago`, ...).
#[must_use]
pub fn humanize_age(age: Duration) -> String {
    /// Seconds in a minute.
    const MINUTE: u64 = 60;
    /// Seconds in an hour.
    const HOUR: u64 = 60 * MINUTE;
    /// Seconds in a day.
    const DAY: u64 = 24 * HOUR;

    let secs = age.as_secs();
    match secs {
        0..MINUTE => "just now".into(),
        MINUTE..HOUR => plural(secs / MINUTE, "minute"),
        HOUR..DAY => plural(secs / HOUR, "hour"),
        DAY.. => plural(secs / DAY, "day"),
    }
}

/// Renders `n` of the given `unit`s as an `N <unit>(s) ago` phrase.
fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// [`DateTime`] when an [`ActivityLog`] event happened.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(ActivityLog, unit::Creation)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::humanize_age;

    #[test]
    fn humanizes_entry_age() {
        assert_eq!(humanize_age(Duration::from_secs(5)), "just now");
        assert_eq!(humanize_age(Duration::from_secs(59)), "just now");
        assert_eq!(humanize_age(Duration::from_secs(60)), "1 minute ago");
        assert_eq!(humanize_age(Duration::from_secs(330)), "5 minutes ago");
        assert_eq!(humanize_age(Duration::from_secs(7200)), "2 hours ago");
        assert_eq!(
            humanize_age(Duration::from_secs(3 * 86400)),
            "3 days ago",
        );
    }
}
