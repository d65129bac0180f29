//! [`Booking`] read models.

use common::Date;

use crate::domain::{user, Booking};

/// [`Booking`] along with the [`User`] who placed it.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct WithUser {
    /// [`Booking`] itself.
    pub booking: Booking,

    /// [`Username`] of the [`User`] who placed the [`Booking`].
    ///
    /// [`User`]: crate::domain::User
    /// [`Username`]: user::Username
    pub username: user::Username,

    /// Displayed [`Name`] of the [`User`] who placed the [`Booking`].
    ///
    /// [`Name`]: user::Name
    /// [`User`]: crate::domain::User
    pub name: user::Name,
}

/// Selector of a [`Booking`] listing.
#[derive(Clone, Copy, Debug)]
pub enum Selector {
    /// Every [`Booking`], newest booked [`Date`] first.
    All,

    /// [`Booking`]s placed by the given [`User`], newest booked [`Date`]
    /// first.
    ///
    /// [`User`]: crate::domain::User
    ForUser(user::Id),

    /// [`Booking`]s on the given calendar [`Date`], in slot order.
    OnDate(Date),

    /// [`Booking`]s on the given [`Date`] or later, whatever their status,
    /// soonest first.
    Upcoming {
        /// First [`Date`] of interest, usually today.
        from: Date,
    },
}
