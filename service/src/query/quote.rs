//! [`Query`] for pricing a prospective [`Booking`].
//!
//! [`Booking`]: crate::domain::Booking

use common::{
    operations::{By, Select},
    Date, TimeOfDay,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::Sport,
        payment,
        pricing::{self, NoRateError},
        VenueConfig,
    },
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] pricing a prospective [`Booking`] without persisting anything.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Debug)]
pub struct Quote {
    /// [`Sport`] to be booked.
    pub sport: Sport,

    /// [`Date`] to be booked.
    pub date: Date,

    /// Start of the [`Slot`] to be booked.
    ///
    /// [`Slot`]: crate::domain::schedule::Slot
    pub start: TimeOfDay,

    /// Indicator whether the booking is made on behalf of a team.
    pub is_team: bool,
}

/// Output of the [`Quote`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Calculated [`pricing::Quote`].
    pub quote: pricing::Quote,

    /// [`UpiDetails`] to pay the [`Quote`] with.
    ///
    /// [`UpiDetails`]: payment::UpiDetails
    pub upi: payment::UpiDetails,
}

impl<Db> Query<Quote> for Service<Db>
where
    Db: Database<
        Select<By<Option<VenueConfig>, ()>>,
        Ok = Option<VenueConfig>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Quote) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Quote {
            sport,
            date,
            start,
            is_team,
        } = cmd;

        let config = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotConfigured)
            .map_err(tracerr::wrap!())?;
        if !config.sports.contains(&sport) {
            return Err(tracerr::new!(E::UnknownSport(sport)));
        }

        let quote = pricing::quote(&config.pricing, date, start, is_team)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            quote,
            upi: self.config.upi.clone(),
        })
    }
}

/// Error of [`Quote`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,

    /// [`PriceTable`] lacks a rate for the requested slot.
    ///
    /// [`PriceTable`]: pricing::PriceTable
    #[display("Venue pricing is not configured: {_0}")]
    PricingNotConfigured(NoRateError),

    /// [`Sport`] is not offered by the venue.
    #[display("`{_0}` is not offered by the venue")]
    #[from(ignore)]
    UnknownSport(#[error(not(source))] Sport),
}
