//! [`Query`] collection over aggregate statistics.

use common::{
    operations::{By, Select},
    Date, DateTime,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{venue::ImageUrl, VenueConfig},
    infra::{database, Database},
    read, Query, Service,
};

/// Number of months of history the [`BookingStats`] series spans.
const SERIES_MONTHS: u8 = 6;

/// [`Query`] for the public landing-page counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overview;

/// Output of the [`Overview`] [`Query`].
#[derive(Clone, Debug)]
pub struct Counters {
    /// Total number of [`Booking`]s ever placed.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub total_bookings: i64,

    /// Number of registered non-administrator [`User`]s.
    ///
    /// [`User`]: crate::domain::User
    pub registered_users: i64,

    /// Average [`Testimonial`] rating, if any were left.
    ///
    /// [`Testimonial`]: crate::domain::Testimonial
    pub average_rating: Option<Decimal>,

    /// Number of sports the venue offers.
    pub sports_offered: usize,
}

impl<Db> Query<Overview> for Service<Db>
where
    Db: Database<
            Select<By<read::stats::Counters, ()>>,
            Ok = read::stats::Counters,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Counters;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Overview) -> Result<Self::Ok, Self::Err> {
        let counters = self
            .database()
            .execute(Select(By::<read::stats::Counters, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let sports_offered = self
            .database()
            .execute(Select(By::<Option<VenueConfig>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?
            .map_or(0, |c| c.sports.len());

        Ok(Counters {
            total_bookings: counters.total_bookings,
            registered_users: counters.registered_users,
            average_rating: counters.average_rating,
            sports_offered,
        })
    }
}

/// [`Query`] for the administrator dashboard statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingStats;

/// Output of the [`BookingStats`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Status-sliced [`Booking`] totals.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub totals: read::stats::BookingTotals,

    /// Per-month booking and revenue series, oldest first.
    pub months: Vec<read::stats::MonthLoad>,

    /// Gallery [`ImageUrl`]s of the venue.
    pub images: Vec<ImageUrl>,
}

impl<Db> Query<BookingStats> for Service<Db>
where
    Db: Database<
            Select<By<read::stats::BookingTotals, Date>>,
            Ok = read::stats::BookingTotals,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::stats::MonthLoad>, read::stats::MonthSpan>>,
            Ok = Vec<read::stats::MonthLoad>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: BookingStats) -> Result<Self::Ok, Self::Err> {
        let today = DateTime::now().date();

        let totals = self
            .database()
            .execute(Select(By::<read::stats::BookingTotals, _>::new(today)))
            .await
            .map_err(tracerr::wrap!())?;

        let months = self
            .database()
            .execute(Select(By::<Vec<read::stats::MonthLoad>, _>::new(
                read::stats::MonthSpan {
                    from: today.first_of_months_back(SERIES_MONTHS - 1),
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let images = self
            .database()
            .execute(Select(By::<Option<VenueConfig>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?
            .map_or_else(Vec::new, |c| c.images);

        Ok(Output {
            totals,
            months,
            images,
        })
    }
}
