//! Price table and [`Quote`] computation.

use common::{
    money::Currency, Date, Money, Percent, TimeOfDay,
};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

/// Day category a base rate is keyed by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,

    /// Saturday or Sunday.
    Weekend,
}

impl DayType {
    /// Determines the [`DayType`] of the given [`Date`].
    #[must_use]
    pub fn of(date: Date) -> Self {
        if date.is_weekend() {
            Self::Weekend
        } else {
            Self::Weekday
        }
    }
}

/// Time-of-day category a base rate is keyed by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    /// Before 12:00.
    Morning,

    /// 12:00 to 16:00.
    Afternoon,

    /// 16:00 onwards.
    Evening,
}

impl Period {
    /// Determines the [`Period`] the given start [`TimeOfDay`] falls into.
    #[must_use]
    pub fn of(start: TimeOfDay) -> Self {
        match start.hour() {
            0..12 => Self::Morning,
            12..16 => Self::Afternoon,
            16.. => Self::Evening,
        }
    }
}

/// Base rates of a single [`DayType`], in whole currency units.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct PeriodRates {
    /// Rate of the [`Period::Morning`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<u32>,

    /// Rate of the [`Period::Afternoon`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<u32>,

    /// Rate of the [`Period::Evening`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening: Option<u32>,
}

impl PeriodRates {
    /// Returns the rate of the given [`Period`], if configured.
    #[must_use]
    pub fn rate(&self, period: Period) -> Option<u32> {
        match period {
            Period::Morning => self.morning,
            Period::Afternoon => self.afternoon,
            Period::Evening => self.evening,
        }
    }
}

/// [`DayType`] × [`Period`] table of base rates a venue charges per slot.
///
/// Stored as part of the venue configuration.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct PriceTable {
    /// Rates of [`DayType::Weekday`]s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<PeriodRates>,

    /// Rates of [`DayType::Weekend`]s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend: Option<PeriodRates>,
}

impl PriceTable {
    /// Looks up the base rate of the given `(day, period)` cell.
    ///
    /// # Errors
    ///
    /// If the table lacks either axis of the cell.
    pub fn base_rate(
        &self,
        day: DayType,
        period: Period,
    ) -> Result<Money, NoRateError> {
        let rates = match day {
            DayType::Weekday => self.weekday,
            DayType::Weekend => self.weekend,
        };
        rates
            .and_then(|r| r.rate(period))
            .map(|units| Money::from_units(units.into(), Currency::Inr))
            .ok_or(NoRateError { day, period })
    }
}

/// Error of a [`PriceTable`] lacking a rate for the requested cell.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("no rate configured for {day} {period}")]
pub struct NoRateError {
    /// [`DayType`] of the missing cell.
    pub day: DayType,

    /// [`Period`] of the missing cell.
    pub period: Period,
}

/// Discount rule applicable to a booking.
///
/// Every rule fires independently and is computed against the base rate, not
/// against the running total.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Discount {
    /// Slot starts between 06:00 and 10:00.
    #[strum(serialize = "Early Bird Discount")]
    EarlyBird,

    /// Booking is made on behalf of a team.
    #[strum(serialize = "Team Booking Discount")]
    Team,

    /// Booking falls on a Saturday or a Sunday.
    #[strum(serialize = "Weekend Discount")]
    Weekend,
}

impl Discount {
    /// Returns the [`Percent`] this [`Discount`] takes off the base rate.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn rate(self) -> Percent {
        let pct = match self {
            Self::EarlyBird => 20,
            Self::Team => 10,
            Self::Weekend => 15,
        };
        Percent::from_int(pct).expect("within range")
    }

    /// Human-readable description of this [`Discount`].
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::EarlyBird => "20% off for slots starting before 10 AM",
            Self::Team => "10% off for team bookings",
            Self::Weekend => "15% off on weekends",
        }
    }

    /// Indicates whether this [`Discount`] fires for the given booking
    /// parameters.
    #[must_use]
    pub fn fires(self, day: DayType, start: TimeOfDay, is_team: bool) -> bool {
        match self {
            Self::EarlyBird => (6..10).contains(&start.hour()),
            Self::Team => is_team,
            Self::Weekend => day == DayType::Weekend,
        }
    }
}

/// Single fired [`Discount`] line of a [`Quote`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppliedDiscount {
    /// [`Discount`] rule that fired.
    pub rule: Discount,

    /// Amount taken off the base rate, truncated to whole currency units.
    pub amount: Money,
}

/// Itemized price breakdown of a candidate booking.
///
/// Computed fresh on every request and never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Base rate the [`PriceTable`] resolves to.
    pub base_price: Money,

    /// [`Discount`]s that fired, in rule order.
    pub discounts: Vec<AppliedDiscount>,

    /// Final amount after all [`Discount`]s, floored at zero.
    pub final_amount: Money,
}

/// Computes a [`Quote`] for a booking on the given `date` starting at `start`.
///
/// Pure function of its inputs and the provided [`PriceTable`] snapshot.
///
/// # Errors
///
/// If the [`PriceTable`] lacks the rate of the resolved cell.
pub fn quote(
    table: &PriceTable,
    date: Date,
    start: TimeOfDay,
    is_team: bool,
) -> Result<Quote, NoRateError> {
    let day = DayType::of(date);
    let base = table.base_rate(day, Period::of(start))?;

    let discounts: Vec<_> = Discount::iter()
        .filter(|rule| rule.fires(day, start, is_team))
        .map(|rule| AppliedDiscount {
            rule,
            amount: Money {
                amount: rule.rate().of(base.amount).trunc(),
                currency: base.currency,
            },
        })
        .collect();

    let total_off: Decimal = discounts.iter().map(|d| d.amount.amount).sum();
    let final_amount = Money {
        amount: (base.amount - total_off).max(Decimal::ZERO),
        currency: base.currency,
    };

    Ok(Quote {
        base_price: base,
        discounts,
        final_amount,
    })
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, Money, TimeOfDay};

    use super::{
        quote, DayType, Discount, NoRateError, Period, PeriodRates, PriceTable,
    };

    fn table() -> PriceTable {
        PriceTable {
            weekday: Some(PeriodRates {
                morning: Some(1000),
                afternoon: Some(1200),
                evening: Some(1500),
            }),
            weekend: Some(PeriodRates {
                morning: Some(1200),
                afternoon: Some(1400),
                evening: Some(1500),
            }),
        }
    }

    #[test]
    fn resolves_day_type_and_period() {
        assert_eq!(
            DayType::of(Date::parse("2025-08-16").unwrap()),
            DayType::Weekend,
        );
        assert_eq!(
            DayType::of(Date::parse("2025-08-18").unwrap()),
            DayType::Weekday,
        );

        assert_eq!(Period::of(TimeOfDay::parse("06:00").unwrap()), Period::Morning);
        assert_eq!(Period::of(TimeOfDay::parse("11:59").unwrap()), Period::Morning);
        assert_eq!(Period::of(TimeOfDay::parse("14:00").unwrap()), Period::Afternoon);
        assert_eq!(Period::of(TimeOfDay::parse("16:00").unwrap()), Period::Evening);
        assert_eq!(Period::of(TimeOfDay::parse("20:00").unwrap()), Period::Evening);
    }

    #[test]
    fn applies_early_bird_on_a_weekday_morning() {
        // Monday.
        let date = Date::parse("2025-08-18").unwrap();
        let start = TimeOfDay::parse("07:00").unwrap();

        let q = quote(&table(), date, start, false).unwrap();

        assert_eq!(q.base_price, Money::from_units(1000, Currency::Inr));
        assert_eq!(q.discounts.len(), 1);
        assert_eq!(q.discounts[0].rule, Discount::EarlyBird);
        assert_eq!(
            q.discounts[0].amount,
            Money::from_units(200, Currency::Inr),
        );
        assert_eq!(q.final_amount, Money::from_units(800, Currency::Inr));
    }

    #[test]
    fn stacks_team_and_weekend_against_base() {
        // Saturday evening.
        let date = Date::parse("2025-08-16").unwrap();
        let start = TimeOfDay::parse("18:00").unwrap();

        let q = quote(&table(), date, start, true).unwrap();

        assert_eq!(q.base_price, Money::from_units(1500, Currency::Inr));
        assert_eq!(
            q.discounts
                .iter()
                .map(|d| (d.rule, d.amount.as_units().unwrap()))
                .collect::<Vec<_>>(),
            vec![(Discount::Team, 150), (Discount::Weekend, 225)],
        );
        assert_eq!(q.final_amount, Money::from_units(1125, Currency::Inr));
    }

    #[test]
    fn final_amount_is_base_minus_listed_discounts() {
        // Saturday morning, every rule fires.
        let date = Date::parse("2025-08-16").unwrap();
        let start = TimeOfDay::parse("06:00").unwrap();

        let q = quote(&table(), date, start, true).unwrap();

        let off: i64 =
            q.discounts.iter().map(|d| d.amount.as_units().unwrap()).sum();
        assert_eq!(off, 240 + 120 + 180);
        assert_eq!(
            q.final_amount.as_units().unwrap(),
            q.base_price.as_units().unwrap() - off,
        );
    }

    #[test]
    fn truncates_discount_amounts() {
        let odd = PriceTable {
            weekday: Some(PeriodRates {
                morning: Some(999),
                ..PeriodRates::default()
            }),
            weekend: None,
        };
        let date = Date::parse("2025-08-18").unwrap();
        let start = TimeOfDay::parse("07:00").unwrap();

        let q = quote(&odd, date, start, false).unwrap();

        // 20% of 999 is 199.8, truncated to 199.
        assert_eq!(
            q.discounts[0].amount,
            Money::from_units(199, Currency::Inr),
        );
        assert_eq!(q.final_amount, Money::from_units(800, Currency::Inr));
    }

    #[test]
    fn is_deterministic() {
        let date = Date::parse("2025-08-16").unwrap();
        let start = TimeOfDay::parse("08:00").unwrap();

        assert_eq!(
            quote(&table(), date, start, true).unwrap(),
            quote(&table(), date, start, true).unwrap(),
        );
    }

    #[test]
    fn fails_without_a_configured_rate() {
        let empty = PriceTable::default();
        let date = Date::parse("2025-08-18").unwrap();
        let start = TimeOfDay::parse("18:00").unwrap();

        let NoRateError { day, period } =
            quote(&empty, date, start, false).unwrap_err();
        assert_eq!(day, DayType::Weekday);
        assert_eq!(period, Period::Evening);
    }
}
