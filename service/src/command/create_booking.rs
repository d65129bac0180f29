//! [`Command`] for placing a new [`Booking`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted, Update},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        activity,
        booking::{self, Notes, Sport, Status},
        pricing::{self, NoRateError},
        schedule::{self, Slot},
        user, ActivityLog, Booking, User, VenueConfig,
    },
    infra::{
        database::{self, constraint},
        notification, Database,
    },
    Service,
};

use super::Command;

/// [`Command`] for placing a new [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// ID of the [`User`] placing the [`Booking`].
    pub user_id: user::Id,

    /// [`Sport`] to book the [`Slot`] for.
    pub sport: Sport,

    /// Calendar [`Date`] to book.
    pub date: Date,

    /// [`Slot`] to book.
    pub slot: Slot,

    /// [`TeamName`] to record on the [`User`], making this a team booking.
    ///
    /// [`TeamName`]: user::TeamName
    pub team_name: Option<user::TeamName>,

    /// Free-form [`Notes`] of the [`Booking`].
    pub notes: Option<Notes>,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<schedule::Occupied, Date>>,
            Ok = schedule::Occupied,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<ActivityLog>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            user_id,
            sport,
            date,
            slot,
            team_name,
            notes,
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
        if !schedule::TEMPLATE.contains(&slot) {
            return Err(tracerr::new!(E::UnknownSlot(slot)));
        }

        let now = DateTime::now();
        if date < now.date()
            || (date == now.date() && slot.start <= now.time_of_day())
        {
            return Err(tracerr::new!(E::SlotInPast(slot)));
        }

        let mut user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let is_team = team_name.is_some();
        let quote = pricing::quote(&config.pricing, date, slot.start, is_team)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let booking = Booking {
            id: booking::Id::new(),
            user_id,
            sport,
            date,
            slot,
            is_team,
            amount: quote.final_amount,
            status: Status::Pending,
            notes,
            admin_notes: None,
            payment: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let occupied = tx
            .execute(Select(By::new(date)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupied.contains(&(slot.start, slot.end, booking.sport.clone())) {
            return Err(tracerr::new!(E::SlotTaken(slot)));
        }

        // The partial unique index remains the final arbiter against a
        // concurrent insert between the check above and this write.
        tx.execute(Insert(booking.clone())).await.map_err(|e| {
            if e.as_ref()
                .is_unique_violation(Some(constraint::BOOKING_SLOT_TAKEN))
            {
                tracerr::new!(E::SlotTaken(slot))
            } else {
                tracerr::map_from_and_wrap!(=> E)(e)
            }
        })?;

        if let Some(team_name) = team_name {
            user.team_name = Some(team_name);
            tx.execute(Update(user.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        tx.execute(Insert(ActivityLog {
            id: activity::Id::new(),
            user_id: Some(user_id),
            kind: activity::Kind::BookingPlaced,
            detail: format!(
                "{} booked {} on {date}",
                user.name, booking.sport,
            ),
            created_at: now.coerce(),
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.outbox().enqueue(notification::Message::BookingPlaced {
            name: user.name,
            email: user.email,
            phone: user.phone,
            sport: booking.sport.clone(),
            date,
            slot,
            amount: booking.amount,
        });

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
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

    /// [`Slot`] is not part of the daily grid.
    #[display("No {} - {} slot exists", _0.start, _0.end)]
    #[from(ignore)]
    UnknownSlot(#[error(not(source))] Slot),

    /// [`Slot`] has already started or lies in the past.
    #[display("{} - {} slot is in the past", _0.start, _0.end)]
    #[from(ignore)]
    SlotInPast(#[error(not(source))] Slot),

    /// [`Slot`] is already held by an active [`Booking`].
    #[display("{} - {} slot is already booked", _0.start, _0.end)]
    #[from(ignore)]
    SlotTaken(#[error(not(source))] Slot),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
