//! [`Command`] for recording a received payment on a [`Booking`].

use common::{
    operations::{By, Select, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, Payment, PaymentReference, Status},
        Booking,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a received payment on a [`Booking`].
///
/// Confirms the [`Booking`] along the way.
#[derive(Clone, Debug)]
pub struct ConfirmPayment {
    /// ID of the paid [`Booking`].
    pub id: booking::Id,

    /// [`PaymentReference`] reported by the payer.
    pub reference: PaymentReference,

    /// Amount the payer reports having paid.
    pub amount: Money,
}

impl<Db> Command<ConfirmPayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ConfirmPayment) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ConfirmPayment { id, reference, amount } = cmd;

        let mut booking = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        let now = DateTime::now();
        booking.payment = Some(Payment {
            reference,
            amount,
            received_at: now,
        });
        booking.status = Status::Confirmed;
        booking.updated_at = now.coerce();

        self.database()
            .execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`ConfirmPayment`] [`Command`] execution.
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
