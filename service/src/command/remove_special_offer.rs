//! [`Command`] for withdrawing a special offer.

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::VenueConfig,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for withdrawing a [`SpecialOffer`] by its position.
///
/// [`SpecialOffer`]: crate::domain::venue::SpecialOffer
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveSpecialOffer {
    /// Zero-based position of the offer in the announced list.
    pub index: usize,
}

impl<Db> Command<RemoveSpecialOffer> for Service<Db>
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
        cmd: RemoveSpecialOffer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveSpecialOffer { index } = cmd;

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

        if index >= config.offers.len() {
            return Err(tracerr::new!(E::NoSuchOffer(index)));
        }
        drop(config.offers.remove(index));
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

/// Error of [`RemoveSpecialOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,

    /// No offer exists at the provided position.
    #[display("No offer exists at position {_0}")]
    #[from(ignore)]
    NoSuchOffer(#[error(not(source))] usize),
}
