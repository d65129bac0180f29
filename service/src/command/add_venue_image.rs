//! [`Command`] for appending an image to the venue gallery.

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{venue::ImageUrl, VenueConfig},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for appending an [`ImageUrl`] to the venue gallery.
#[derive(Clone, Debug, From)]
pub struct AddVenueImage {
    /// [`ImageUrl`] to append.
    pub url: ImageUrl,
}

impl<Db> Command<AddVenueImage> for Service<Db>
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

    async fn execute(&self, cmd: AddVenueImage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddVenueImage { url } = cmd;

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

        if config.images.contains(&url) {
            return Err(tracerr::new!(E::DuplicateImage(url)));
        }
        config.images.push(url);
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

/// Error of [`AddVenueImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`VenueConfig`] exists yet.
    #[display("Venue is not configured")]
    VenueNotConfigured,

    /// [`ImageUrl`] is already present in the gallery.
    #[display("`{_0}` is already in the gallery")]
    #[from(ignore)]
    DuplicateImage(#[error(not(source))] ImageUrl),
}
