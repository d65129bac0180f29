//! [`Command`] for replacing the [`VenueConfig`].

use common::{operations::Update, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::Sport,
        pricing::PriceTable,
        user,
        venue::{ImageUrl, Name, SpecialOffer},
        VenueConfig,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing the [`VenueConfig`] wholesale.
///
/// Creates the singleton row if the venue has never been configured.
#[derive(Clone, Debug)]
pub struct UpdateVenueConfig {
    /// Displayed [`Name`] of the venue.
    pub name: Name,

    /// Free-form description of the venue.
    pub description: String,

    /// Contact [`Phone`] of the venue.
    ///
    /// [`Phone`]: user::Phone
    pub phone: user::Phone,

    /// Contact [`Email`] of the venue.
    ///
    /// [`Email`]: user::Email
    pub email: user::Email,

    /// Street address of the venue.
    pub address: String,

    /// [`Sport`]s offered by the venue.
    pub sports: Vec<Sport>,

    /// [`PriceTable`] of the venue.
    pub pricing: PriceTable,

    /// Gallery [`ImageUrl`]s of the venue.
    pub images: Vec<ImageUrl>,

    /// Running [`SpecialOffer`]s of the venue.
    pub offers: Vec<SpecialOffer>,
}

impl<Db> Command<UpdateVenueConfig> for Service<Db>
where
    Db: Database<Update<VenueConfig>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = VenueConfig;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateVenueConfig,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateVenueConfig {
            name,
            description,
            phone,
            email,
            address,
            sports,
            pricing,
            images,
            offers,
        } = cmd;

        let config = VenueConfig {
            name,
            description,
            phone,
            email,
            address,
            sports,
            pricing,
            images,
            offers,
            updated_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Update(config.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(config)
    }
}

/// Error of [`UpdateVenueConfig`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
