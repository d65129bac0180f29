//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Decimal::ONE_HUNDRED)
            .then_some(Self(val))
    }

    /// Creates a new [`Percent`] from a whole number of percent.
    #[must_use]
    pub fn from_int(val: u8) -> Option<Self> {
        Self::new(Decimal::from(val))
    }

    /// Returns this share of the provided `amount`.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn rejects_out_of_range() {
        assert!(Percent::new(Decimal::from(-1)).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());
        assert!(Percent::from_int(0).is_some());
        assert!(Percent::from_int(100).is_some());
    }

    #[test]
    fn takes_share_of_amount() {
        let pct = Percent::from_int(20).unwrap();
        assert_eq!(pct.of(Decimal::from(1000)), Decimal::from(200));

        let pct = Percent::from_int(15).unwrap();
        assert_eq!(pct.of(Decimal::from(1500)), Decimal::from(225));
    }
}
