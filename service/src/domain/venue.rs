//! [`VenueConfig`] definitions.

use std::str::FromStr;

use common::{unit, Date, DateTimeOf};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Booking;
use crate::domain::{booking::Sport, pricing::PriceTable, user};

/// Configuration of the venue.
///
/// A well-known singleton record, created at setup and mutated only by
/// administrative updates.
#[derive(Clone, Debug)]
pub struct VenueConfig {
    /// Displayed [`Name`] of the venue.
    pub name: Name,

    /// Free-form description of the venue.
    pub description: String,

    /// Contact phone of the venue.
    pub phone: user::Phone,

    /// Contact email of the venue.
    pub email: user::Email,

    /// Postal address of the venue.
    pub address: String,

    /// [`Sport`]s that can be booked at the venue.
    pub sports: Vec<Sport>,

    /// [`PriceTable`] the venue charges by.
    pub pricing: PriceTable,

    /// Gallery [`ImageUrl`]s of the venue.
    pub images: Vec<ImageUrl>,

    /// Currently advertised [`SpecialOffer`]s.
    pub offers: Vec<SpecialOffer>,

    /// [`DateTime`] when this [`VenueConfig`] was last updated.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: UpdateDateTime,
}

/// Displayed name of the venue.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 120
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// URL of a gallery image of the venue.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.len() <= 2000
            && (url.starts_with("http://")
                || url.starts_with("https://")
                || url.starts_with('/'))
    }
}

impl From<ImageUrl> for String {
    fn from(url: ImageUrl) -> Self {
        url.0
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Promotional offer advertised by the venue.
///
/// Purely informational and never affects a [`Booking`] price.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SpecialOffer {
    /// Headline of this [`SpecialOffer`].
    pub title: String,

    /// Displayed details of this [`SpecialOffer`].
    pub description: String,

    /// Advertised discount of this [`SpecialOffer`] (free-form, like
    /// `20% OFF`).
    pub discount: String,

    /// First [`Date`] this [`SpecialOffer`] is valid on.
    pub valid_from: Date,

    /// Last [`Date`] this [`SpecialOffer`] is valid on.
    pub valid_until: Date,
}

/// [`DateTime`] when a [`VenueConfig`] was last updated.
///
/// [`DateTime`]: common::DateTime
pub type UpdateDateTime = DateTimeOf<(VenueConfig, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::ImageUrl;

    #[test]
    fn validates_image_url() {
        assert!(ImageUrl::new("https://cdn.example.com/turf-1.jpg").is_some());
        assert!(ImageUrl::new("/static/uploads/turf-2.jpg").is_some());

        assert!(ImageUrl::new("javascript:alert(1)").is_none());
        assert!(ImageUrl::new("turf.jpg").is_none());
    }
}
