//! [`Command`] for dropping an image from the venue gallery.

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

/// [`Command`] for dropping an image from the venue gallery by its position.
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveVenueImage {
    /// Zero-based position of the image in the gallery.
    pub index: usize,
}

impl<Db> Command<RemoveVenueImage> for Service<Db>
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
        cmd: RemoveVenueImage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveVenueImage { index } = cmd;

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

        if index >= config.images.len() {
            return Err(tracerr::new!(E::NoSuchImage(index)));
        }
        drop(config.images.remove(index));
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

/// Error of [`RemoveVenueImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,

    /// No image exists at the provided position.
    #[display("No image exists at position {_0}")]
    #[from(ignore)]
    NoSuchImage(#[error(not(source))] usize),
}
