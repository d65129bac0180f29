//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] from a whole number of [`Currency`] units.
    #[must_use]
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self {
            amount: Decimal::from(units),
            currency,
        }
    }

    /// Returns this amount as a whole number of [`Currency`] units.
    ///
    /// [`None`] is returned if the amount has a fractional part or doesn't
    /// fit into an [`i64`].
    #[must_use]
    pub fn as_units(&self) -> Option<i64> {
        self.amount.is_integer().then(|| self.amount.to_i64())?
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Indian Rupee."]
        Inr = 1,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::Money;

    impl serde::Serialize for Money {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            String::deserialize(deserializer)?
                .parse()
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("1000INR").unwrap(),
            Money {
                amount: Decimal::from(1000),
                currency: Currency::Inr,
            },
        );
        assert_eq!(
            Money::from_str("123.45INR").unwrap(),
            Money {
                amount: "123.45".parse().unwrap(),
                currency: Currency::Inr,
            },
        );

        assert!(Money::from_str("1000").is_err());
        assert!(Money::from_str("1000In").is_err());
        assert!(Money::from_str("1000Rupees").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::from_units(1500, Currency::Inr).to_string(),
            "1500INR",
        );
        assert_eq!(
            Money {
                amount: "123.45".parse().unwrap(),
                currency: Currency::Inr,
            }
            .to_string(),
            "123.45INR",
        );
        assert_eq!(
            Money {
                amount: "123.0".parse().unwrap(),
                currency: Currency::Inr,
            }
            .to_string(),
            "123INR",
        );
    }

    #[test]
    fn as_units() {
        assert_eq!(
            Money::from_units(800, Currency::Inr).as_units(),
            Some(800),
        );
        assert_eq!(
            Money {
                amount: "123.45".parse().unwrap(),
                currency: Currency::Inr,
            }
            .as_units(),
            None,
        );
    }
}
