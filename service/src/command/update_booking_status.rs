//! [`Command`] for deciding a [`Booking`]'s fate.

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        activity,
        booking::{self, Notes, Status},
        user, ActivityLog, Booking, User,
    },
    infra::{database, notification, Database},
    Service,
};

use super::Command;

/// [`Command`] for deciding a [`Booking`]'s fate.
#[derive(Clone, Debug)]
pub struct UpdateBookingStatus {
    /// ID of the [`Booking`] to update.
    pub id: booking::Id,

    /// New [`Status`] of the [`Booking`].
    pub status: Status,

    /// [`Notes`] left by an administrator, replacing the present ones if any.
    pub admin_notes: Option<Notes>,
}

impl<Db> Command<UpdateBookingStatus> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<ActivityLog>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBookingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBookingStatus {
            id,
            status,
            admin_notes,
        } = cmd;

        let mut booking = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        booking.status = status;
        if admin_notes.is_some() {
            booking.admin_notes = admin_notes;
        }
        booking.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.database()
            .execute(Insert(ActivityLog {
                id: activity::Id::new(),
                user_id: Some(booking.user_id),
                kind: activity::Kind::BookingUpdated,
                detail: format!(
                    "{} booking on {} is now {status}",
                    booking.sport, booking.date,
                ),
                created_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(user) = self
            .database()
            .execute(Select(By::new(booking.user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            self.outbox().enqueue(notification::Message::BookingDecided {
                name: user.name,
                email: user.email,
                phone: user.phone,
                sport: booking.sport.clone(),
                date: booking.date,
                status,
            });
        }

        Ok(booking)
    }
}

/// Error of [`UpdateBookingStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),
}
