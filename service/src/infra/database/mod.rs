//! [`Database`]-related implementations.

#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// Names of schema constraints surfaced as typed conflicts.
pub mod constraint {
    /// Unique constraint on `users.username`.
    pub const USER_USERNAME: &str = "users_username_key";

    /// Unique constraint on `users.email`.
    pub const USER_EMAIL: &str = "users_email_key";

    /// Partial unique index preventing two active bookings from occupying
    /// the same `(date, start_time, end_time, sport)`.
    pub const BOOKING_SLOT_TAKEN: &str = "bookings_slot_taken";

    /// Unique constraint allowing a user to review each sport at most once.
    pub const TESTIMONIAL_USER_SPORT: &str = "testimonials_user_sport_key";
}

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_unique_violation(constraint),
        }
    }
}
