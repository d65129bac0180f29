//! [`Testimonial`] definitions.

use std::str::FromStr;

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{booking::Sport, user};

/// Review left by a [`User`] on the landing page.
///
/// A [`User`] may review each [`Sport`] at most once.
///
/// [`User`]: user::User
#[derive(Clone, Debug)]
pub struct Testimonial {
    /// ID of this [`Testimonial`].
    pub id: Id,

    /// ID of the [`User`] who left this [`Testimonial`].
    ///
    /// [`User`]: user::User
    pub user_id: user::Id,

    /// [`Sport`] this [`Testimonial`] reviews.
    pub sport: Sport,

    /// [`Rating`] given by this [`Testimonial`].
    pub rating: Rating,

    /// [`Content`] of this [`Testimonial`].
    pub content: Content,

    /// Indicator whether an administrator pinned this [`Testimonial`] to the
    /// top of the listing.
    pub is_featured: bool,

    /// [`DateTime`] when this [`Testimonial`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

/// ID of a [`Testimonial`].
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

/// Star rating of a [`Testimonial`], from 1 to 5.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(into = "i16", try_from = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Creates a new [`Rating`] if the given `stars` value is valid.
    #[must_use]
    pub fn new(stars: i16) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }
}

impl From<Rating> for i16 {
    fn from(r: Rating) -> Self {
        r.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = &'static str;

    fn try_from(stars: i16) -> Result<Self, Self::Error> {
        Self::new(stars).ok_or("invalid `Rating`")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Rating {
    postgres_types::accepts!(INT2);

    fn from_sql(
        ty: &postgres_types::Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Self::new(i16::from_sql(ty, raw)?)
            .ok_or_else(|| "invalid `Rating` value".into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Rating {
    postgres_types::accepts!(INT2);
    postgres_types::to_sql_checked!();

    fn to_sql(
        &self,
        ty: &postgres_types::Type,
        w: &mut postgres_types::private::BytesMut,
    ) -> Result<
        postgres_types::IsNull,
        Box<dyn std::error::Error + Sync + Send>,
    > {
        self.0.to_sql(ty, w)
    }
}

/// Text of a [`Testimonial`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Content(String);

impl Content {
    /// Creates a new [`Content`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Content`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 1000
    }
}

impl FromStr for Content {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Content`")
    }
}

/// [`DateTime`] when a [`Testimonial`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Testimonial, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Content, Rating};

    #[test]
    fn rating_is_one_to_five_stars() {
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(5).is_some());

        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(Rating::new(-1).is_none());
    }

    #[test]
    fn content_must_not_be_blank() {
        assert!(Content::new("Great turf, well maintained.").is_some());

        assert!(Content::new("").is_none());
        assert!(Content::new("   ").is_none());
        assert!(Content::new("x".repeat(1001)).is_none());
    }
}
