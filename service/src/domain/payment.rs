//! [UPI] payment deep link generation.
//!
//! [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Booking;

/// Merchant details payment deep links are generated for.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpiDetails {
    /// Virtual payment [`Address`] of the merchant.
    pub address: Address,

    /// Displayed payee name of the merchant.
    pub payee_name: String,
}

/// Virtual payment address (VPA) of a [UPI] account, like `turf@okaxis`.
///
/// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `vpa` is valid.
    #[must_use]
    pub fn new(vpa: impl Into<String>) -> Option<Self> {
        let vpa = vpa.into();
        Self::check(&vpa).then_some(Self(vpa))
    }

    /// Checks whether the given `vpa` is a valid [`Address`].
    fn check(vpa: impl AsRef<str>) -> bool {
        let vpa = vpa.as_ref();
        vpa.len() <= 100
            && vpa.split_once('@').is_some_and(|(handle, provider)| {
                !handle.is_empty()
                    && !provider.is_empty()
                    && handle.chars().all(|c| {
                        c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
                    })
                    && provider.chars().all(char::is_alphanumeric)
            })
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

impl TryFrom<String> for Address {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Per-app payment deep links for a single [`Booking`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Links {
    /// Generic `upi://` link understood by any [UPI] app.
    ///
    /// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
    pub upi: String,

    /// Google Pay variant.
    pub gpay: String,

    /// PhonePe variant.
    pub phonepe: String,

    /// Paytm variant.
    pub paytm: String,
}

impl Links {
    /// Builds the payment [`Links`] asking for the given `amount` with the
    /// given transaction `note`.
    #[must_use]
    pub fn build(upi: &UpiDetails, amount: Money, note: &str) -> Self {
        let query = format!(
            "pa={}&pn={}&tn={}&am={}&cu={}",
            urlencoding::encode(upi.address.as_ref()),
            urlencoding::encode(&upi.payee_name),
            urlencoding::encode(note),
            amount.amount,
            amount.currency,
        );

        Self {
            upi: format!("upi://pay?{query}"),
            gpay: format!("tez://upi/pay?{query}"),
            phonepe: format!("phonepe://pay?{query}"),
            paytm: format!("paytmmp://pay?{query}"),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};

    use super::{Address, Links, UpiDetails};

    fn merchant() -> UpiDetails {
        UpiDetails {
            address: Address::new("sportzone@okaxis").unwrap(),
            payee_name: "SportZone Turf".into(),
        }
    }

    #[test]
    fn validates_address() {
        assert!(Address::new("sportzone@okaxis").is_some());
        assert!(Address::new("turf.pay-1@ybl").is_some());

        assert!(Address::new("no-at-sign").is_none());
        assert!(Address::new("@okaxis").is_none());
        assert!(Address::new("handle@").is_none());
    }

    #[test]
    fn builds_links_for_every_app() {
        let amount = Money::from_units(1125, Currency::Inr);
        let links = Links::build(&merchant(), amount, "Booking TRF-1125");

        assert_eq!(
            links.upi,
            "upi://pay?pa=sportzone%40okaxis&pn=SportZone%20Turf\
             &tn=Booking%20TRF-1125&am=1125&cu=INR",
        );
        assert!(links.gpay.starts_with("tez://upi/pay?"));
        assert!(links.phonepe.starts_with("phonepe://pay?"));
        assert!(links.paytm.starts_with("paytmmp://pay?"));

        for link in [&links.gpay, &links.phonepe, &links.paytm] {
            assert!(link.ends_with("&am=1125&cu=INR"));
        }
    }
}
