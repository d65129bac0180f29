//! Calendar [`Date`] and wall-clock [`TimeOfDay`] definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use std::error::Error as StdError;

use derive_more::{Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Weekday,
};

/// Format of a [`Date`] (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Format of a [`TimeOfDay`] (`HH:MM`).
const TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]");

/// Calendar date without a time component.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Parses a [`Date`] from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// If the string is not a valid calendar date.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, ParseError> {
        time::Date::parse(s.as_ref(), DATE_FORMAT)
            .map(Self)
            .map_err(ParseError)
    }

    /// Indicates whether this [`Date`] falls on a Saturday or a Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Saturday | Weekday::Sunday)
    }

    /// Returns the next [`Date`] after this one.
    #[expect(clippy::missing_panics_doc, reason = "in representable range")]
    #[must_use]
    pub fn next_day(self) -> Self {
        Self(self.0.next_day().expect("in representable range"))
    }

    /// Returns the next Saturday strictly after this [`Date`].
    #[must_use]
    pub fn next_saturday(self) -> Self {
        let mut d = self.next_day();
        while d.0.weekday() != Weekday::Saturday {
            d = d.next_day();
        }
        d
    }

    /// Returns the first day of the month lying the provided number of
    /// `months` before this [`Date`]'s month.
    #[expect(clippy::missing_panics_doc, reason = "in representable range")]
    #[must_use]
    pub fn first_of_months_back(self, months: u8) -> Self {
        let total = self.0.year() * 12 + i32::from(u8::from(self.0.month()))
            - 1
            - i32::from(months);
        let year = total.div_euclid(12);
        let month = u8::try_from(total.rem_euclid(12) + 1)
            .expect("in `1..=12` range");
        Self(
            time::Date::from_calendar_date(
                year,
                time::Month::try_from(month).expect("in `1..=12` range"),
                1,
            )
            .expect("first day always exists"),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<time::Date> for Date {
    fn from(d: time::Date) -> Self {
        Self(d)
    }
}

impl From<Date> for time::Date {
    fn from(d: Date) -> Self {
        d.0
    }
}

/// Wall-clock time of day with a minute precision.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay(time::Time);

impl TimeOfDay {
    /// Parses a [`TimeOfDay`] from an `HH:MM` string.
    ///
    /// # Errors
    ///
    /// If the string is not a valid wall-clock time.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, ParseError> {
        time::Time::parse(s.as_ref(), TIME_FORMAT)
            .map(Self)
            .map_err(ParseError)
    }

    /// Returns the hour component of this [`TimeOfDay`] (`0..=23`).
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.0.hour()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(TIME_FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<time::Time> for TimeOfDay {
    fn from(t: time::Time) -> Self {
        Self(t)
    }
}

impl From<TimeOfDay> for time::Time {
    fn from(t: TimeOfDay) -> Self {
        t.0
    }
}

/// Error of parsing a [`Date`] or a [`TimeOfDay`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid calendar value: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for TimeOfDay {
    accepts!(TIME);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Time::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for TimeOfDay {
    accepts!(TIME);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::{Date, TimeOfDay};

    impl serde::Serialize for Date {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::parse(String::deserialize(deserializer)?)
                .map_err(D::Error::custom)
        }
    }

    impl serde::Serialize for TimeOfDay {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for TimeOfDay {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::parse(String::deserialize(deserializer)?)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, TimeOfDay};

    #[test]
    fn parses_date() {
        let d = Date::parse("2025-08-16").unwrap();
        assert!(d.is_weekend());
        assert_eq!(d.to_string(), "2025-08-16");

        let d = Date::parse("2025-08-18").unwrap();
        assert!(!d.is_weekend());

        assert!(Date::parse("2025-13-01").is_err());
        assert!(Date::parse("not-a-date").is_err());
        assert!(Date::parse("2025-02-30").is_err());
    }

    #[test]
    fn parses_time_of_day() {
        let t = TimeOfDay::parse("06:00").unwrap();
        assert_eq!(t.hour(), 6);
        assert_eq!(t.to_string(), "06:00");

        assert_eq!(TimeOfDay::parse("22:30").unwrap().hour(), 22);

        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("9 AM").is_err());
    }

    #[test]
    fn finds_next_saturday() {
        // 2025-08-18 is a Monday.
        let monday = Date::parse("2025-08-18").unwrap();
        assert_eq!(monday.next_saturday().to_string(), "2025-08-23");

        // Already a Saturday resolves to the following week.
        let saturday = Date::parse("2025-08-16").unwrap();
        assert_eq!(saturday.next_saturday().to_string(), "2025-08-23");
    }

    #[test]
    fn rewinds_whole_months() {
        let d = Date::parse("2025-08-16").unwrap();
        assert_eq!(d.first_of_months_back(0).to_string(), "2025-08-01");
        assert_eq!(d.first_of_months_back(5).to_string(), "2025-03-01");
        // Crosses a year boundary.
        assert_eq!(d.first_of_months_back(9).to_string(), "2024-11-01");
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TimeOfDay::parse("06:00").unwrap();
        let later = TimeOfDay::parse("18:00").unwrap();
        assert!(earlier < later);

        let d1 = Date::parse("2025-08-16").unwrap();
        let d2 = Date::parse("2025-09-01").unwrap();
        assert!(d1 < d2);
    }
}
