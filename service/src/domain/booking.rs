//! [`Booking`] definitions.

use std::str::FromStr;

use common::{
    define_kind, unit, Date, DateTime, DateTimeOf, Money,
};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{schedule::Slot, user};

/// Reservation of a [`Slot`] for a [`Sport`] on a calendar [`Date`].
///
/// Never physically deleted; cancellation is a [`Status`] transition.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the [`User`] who placed this [`Booking`].
    ///
    /// [`User`]: user::User
    pub user_id: user::Id,

    /// [`Sport`] this [`Booking`] reserves the [`Slot`] for.
    pub sport: Sport,

    /// Calendar [`Date`] of this [`Booking`].
    pub date: Date,

    /// Reserved [`Slot`].
    pub slot: Slot,

    /// Indicator whether this [`Booking`] is made on behalf of a team.
    pub is_team: bool,

    /// Quoted amount due for this [`Booking`].
    pub amount: Money,

    /// Lifecycle [`Status`] of this [`Booking`].
    pub status: Status,

    /// Free-form [`Notes`] left by the [`User`], if any.
    ///
    /// [`User`]: user::User
    pub notes: Option<Notes>,

    /// [`Notes`] left by an administrator on a [`Status`] transition, if any.
    pub admin_notes: Option<Notes>,

    /// [`Payment`] received for this [`Booking`], if any.
    pub payment: Option<Payment>,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Booking`] was last updated.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Booking`].
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
    #[doc = "Lifecycle status of a [`Booking`]."]
    enum Status {
        #[doc = "Awaiting administrative confirmation."]
        Pending = 1,

        #[doc = "Confirmed by an administrator."]
        Confirmed = 2,

        #[doc = "Cancelled by the user or an administrator."]
        Cancelled = 3,

        #[doc = "Rejected by an administrator."]
        Rejected = 4,
    }
}

impl Status {
    /// Indicates whether a [`Booking`] in this [`Status`] still occupies its
    /// [`Slot`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// Sport a [`Booking`] reserves a [`Slot`] for.
///
/// Must be one of the sports the venue is configured with.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(into = "String", try_from = "String")]
pub struct Sport(String);

impl Sport {
    /// Creates a new [`Sport`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Sport`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 50
    }
}

impl FromStr for Sport {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Sport`")
    }
}

impl TryFrom<String> for Sport {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Sport`")
    }
}

/// Free-form note attached to a [`Booking`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Notes`].
    fn check(text: impl AsRef<str>) -> bool {
        text.as_ref().len() <= 500
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}

/// Payment received for a [`Booking`].
///
/// Persisted alongside the [`Booking`] as a JSON document.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Payment {
    /// [UPI] transaction reference reported by the payer.
    ///
    /// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
    pub reference: PaymentReference,

    /// Amount the payer reports having paid.
    pub amount: Money,

    /// [`DateTime`] when this [`Payment`] was reported.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub received_at: DateTime,
}

/// [UPI] transaction reference of a [`Payment`].
///
/// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Creates a new [`PaymentReference`] if the given `reference` is valid.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        Self::check(&reference).then_some(Self(reference))
    }

    /// Checks whether the given `reference` is a valid [`PaymentReference`].
    fn check(reference: impl AsRef<str>) -> bool {
        let reference = reference.as_ref();
        (4..=64).contains(&reference.len())
            && reference.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl From<PaymentReference> for String {
    fn from(r: PaymentReference) -> Self {
        r.0
    }
}

impl FromStr for PaymentReference {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PaymentReference`")
    }
}

impl TryFrom<String> for PaymentReference {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `PaymentReference`")
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

/// [`DateTime`] when a [`Booking`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Booking, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{PaymentReference, Sport, Status};

    #[test]
    fn only_pending_and_confirmed_occupy_a_slot() {
        assert!(Status::Pending.is_active());
        assert!(Status::Confirmed.is_active());
        assert!(!Status::Cancelled.is_active());
        assert!(!Status::Rejected.is_active());
    }

    #[test]
    fn validates_sport() {
        assert!(Sport::new("Football").is_some());
        assert!(Sport::new("Box Cricket").is_some());

        assert!(Sport::new("").is_none());
        assert!(Sport::new(" padded ").is_none());
    }

    #[test]
    fn validates_payment_reference() {
        assert!(PaymentReference::new("UPI123456789").is_some());
        assert!(PaymentReference::new("T2508-161234").is_some());

        assert!(PaymentReference::new("abc").is_none());
        assert!(PaymentReference::new("has spaces here").is_none());
    }
}
