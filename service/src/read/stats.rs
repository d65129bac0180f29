//! Aggregated counters of dashboard views.

use common::Date;
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::{Booking, Testimonial, User};

/// Site-wide counters displayed on the landing page.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    /// Total number of [`Booking`]s ever placed.
    pub total_bookings: i64,

    /// Number of registered [`User`]s.
    pub registered_users: i64,

    /// Average [`Testimonial`] rating, if any were left.
    pub average_rating: Option<Decimal>,
}

/// Per-status [`Booking`] totals of the administrative dashboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingTotals {
    /// Total number of [`Booking`]s.
    pub total: i64,

    /// Number of pending [`Booking`]s.
    pub pending: i64,

    /// Number of confirmed [`Booking`]s.
    pub confirmed: i64,

    /// Number of cancelled [`Booking`]s.
    pub cancelled: i64,

    /// Number of rejected [`Booking`]s.
    pub rejected: i64,

    /// Number of [`Booking`]s confirmed for the requested [`Date`].
    pub confirmed_today: i64,

    /// Summed amount of confirmed [`Booking`]s.
    pub revenue: Decimal,
}

/// [`Booking`] count and revenue of a single calendar month.
#[derive(Clone, Copy, Debug)]
pub struct MonthLoad {
    /// First [`Date`] of the month.
    pub month: Date,

    /// Number of [`Booking`]s placed for dates in the month.
    pub bookings: i64,

    /// Summed amount of confirmed [`Booking`]s in the month.
    pub revenue: Decimal,
}

/// Selector of a monthly [`MonthLoad`] series.
#[derive(Clone, Copy, Debug)]
pub struct MonthSpan {
    /// First [`Date`] of the earliest month of interest.
    pub from: Date,
}
