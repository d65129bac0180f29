//! [`Command`] for announcing a special offer.

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{venue::SpecialOffer, VenueConfig},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for announcing a [`SpecialOffer`].
#[derive(Clone, Debug, From)]
pub struct AddSpecialOffer {
    /// [`SpecialOffer`] to announce.
    pub offer: SpecialOffer,
}

impl<Db> Command<AddSpecialOffer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<VenueConfig>, ()>>,
            Ok = Option<VenueConfig>,
            Err = Traced<database::Error>,
        > + Database<Update<VenueConfig>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = VenueConfig;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddSpecialOffer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddSpecialOffer { offer } = cmd;

        if offer.valid_until < offer.valid_from {
            return Err(tracerr::new!(E::InvalidValidity {
                from: offer.valid_from,
                until: offer.valid_until,
            }));
        }
        if offer.valid_until < DateTime::now().date() {
            return Err(tracerr::new!(E::AlreadyExpired(offer.valid_until)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut config = tx
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotConfigured)
            .map_err(tracerr::wrap!())?;

        config.offers.push(offer);
        config.updated_at = DateTime::now().coerce();

        tx.execute(Update(config.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(config)
    }
}

/// Error of [`AddSpecialOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,

    /// [`SpecialOffer`] validity period ends before it starts.
    #[display("Offer validity ends ({until}) before it starts ({from})")]
    #[from(ignore)]
    InvalidValidity {
        /// First [`Date`] of the period.
        from: common::Date,

        /// Last [`Date`] of the period.
        until: common::Date,
    },

    /// [`SpecialOffer`] expires before it is even announced.
    #[display("Offer validity ends in the past: {_0}")]
    #[from(ignore)]
    AlreadyExpired(#[error(not(source))] common::Date),
}
