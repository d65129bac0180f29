//! [`Query`] collection over the slot calendar.

use common::{
    operations::{By, Select},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{schedule, VenueConfig},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] for the bookable [`Slot`]s of a single [`Date`].
///
/// [`Slot`]: schedule::Slot
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub struct AvailableSlots {
    /// [`Date`] to list the [`Slot`]s for.
    ///
    /// [`Slot`]: schedule::Slot
    pub date: Date,
}

impl<Db> Query<AvailableSlots> for Service<Db>
where
    Db: Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<schedule::Occupied, Date>>,
            Ok = schedule::Occupied,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<schedule::AvailableSlot>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        AvailableSlots { date }: AvailableSlots,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let config = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotConfigured)
            .map_err(tracerr::wrap!())?;

        let occupied = self
            .database()
            .execute(Select(By::new(date)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(schedule::available(
            date,
            DateTime::now(),
            &config.sports,
            &occupied,
        ))
    }
}

/// [`Query`] for an at-a-glance availability of the nearest notable days.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuickAvailability;

/// Output of the [`QuickAvailability`] [`Query`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Days {
    /// Today's remaining availability.
    pub today: DaySummary,

    /// Tomorrow's availability.
    pub tomorrow: DaySummary,

    /// Availability of the next Saturday.
    pub next_saturday: DaySummary,
}

/// Availability of a single [`Date`] in a [`Days`] summary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DaySummary {
    /// The summarized [`Date`].
    pub date: Date,

    /// Number of [`Slot`]s still having at least one bookable sport.
    ///
    /// [`Slot`]: schedule::Slot
    pub free_slots: usize,
}

impl<Db> Query<QuickAvailability> for Service<Db>
where
    Db: Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<schedule::Occupied, Date>>,
            Ok = schedule::Occupied,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Days;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: QuickAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let config = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotConfigured)
            .map_err(tracerr::wrap!())?;

        let now = DateTime::now();
        let today = now.date();

        let mut summaries = Vec::with_capacity(3);
        for date in [today, today.next_day(), today.next_saturday()] {
            let occupied = self
                .database()
                .execute(Select(By::new(date)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            summaries.push(DaySummary {
                date,
                free_slots:
                    schedule::available(date, now, &config.sports, &occupied)
                        .len(),
            });
        }

        let [today, tomorrow, next_saturday]: [DaySummary; 3] = summaries
            .try_into()
            .expect("exactly three days are summarized");
        Ok(Days {
            today,
            tomorrow,
            next_saturday,
        })
    }
}

/// Error of an availability [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,
}
