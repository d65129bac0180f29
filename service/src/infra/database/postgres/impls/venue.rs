//! [`VenueConfig`]-related [`Database`] implementations.

use common::operations::{By, Select, Update};
use postgres_types::Json;
use tracerr::Traced;

use crate::{
    domain::VenueConfig,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<VenueConfig>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<VenueConfig>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Option<VenueConfig>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT name, description, phone, email, address, \
                   sports, pricing, images, offers, updated_at \
            FROM venue_config \
            WHERE id \
            LIMIT 1";
        Ok(self.query_opt(SQL, &[]).await.map_err(tracerr::wrap!())?.map(
            |row| VenueConfig {
                name: row.get("name"),
                description: row.get("description"),
                phone: row.get("phone"),
                email: row.get("email"),
                address: row.get("address"),
                sports: row.get::<_, Json<_>>("sports").0,
                pricing: row.get::<_, Json<_>>("pricing").0,
                images: row.get::<_, Json<_>>("images").0,
                offers: row.get::<_, Json<_>>("offers").0,
                updated_at: row.get("updated_at"),
            },
        ))
    }
}

impl<C> Database<Update<VenueConfig>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(config): Update<VenueConfig>,
    ) -> Result<Self::Ok, Self::Err> {
        let VenueConfig {
            name,
            description,
            phone,
            email,
            address,
            sports,
            pricing,
            images,
            offers,
            updated_at,
        } = config;
        let sports = Json(sports);
        let pricing = Json(pricing);
        let images = Json(images);
        let offers = Json(offers);

        // Singleton row keyed by a constant `TRUE`.
        const SQL: &str = "\
            INSERT INTO venue_config (\
                id, name, description, phone, email, address, \
                sports, pricing, images, offers, updated_at\
            ) \
            VALUES (\
                TRUE, $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::JSONB, $7::JSONB, $8::JSONB, $9::JSONB, \
                $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                phone = EXCLUDED.phone, \
                email = EXCLUDED.email, \
                address = EXCLUDED.address, \
                sports = EXCLUDED.sports, \
                pricing = EXCLUDED.pricing, \
                images = EXCLUDED.images, \
                offers = EXCLUDED.offers, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &name,
                &description,
                &phone,
                &email,
                &address,
                &sports,
                &pricing,
                &images,
                &offers,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
