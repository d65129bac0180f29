//! [`Testimonial`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::Testimonial,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<Testimonial>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(testimonial): Insert<Testimonial>,
    ) -> Result<Self::Ok, Self::Err> {
        let Testimonial {
            id,
            user_id,
            sport,
            rating,
            content,
            is_featured,
            created_at,
        } = testimonial;

        const SQL: &str = "\
            INSERT INTO testimonials (\
                id, user_id, sport, rating, content, is_featured, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::INT2, $5::VARCHAR, \
                $6::BOOL, $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &sport,
                &rating,
                &content,
                &is_featured,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<
        Select<
            By<Vec<read::testimonial::WithUser>, read::testimonial::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::testimonial::WithUser>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::testimonial::WithUser>, read::testimonial::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::testimonial::Selector { limit } = by.into_inner();

        const SQL: &str = "\
            SELECT t.id, t.user_id, t.sport, t.rating, t.content, \
                   t.is_featured, t.created_at, u.name \
            FROM testimonials AS t \
            JOIN users AS u ON u.id = t.user_id \
            ORDER BY t.is_featured DESC, t.created_at DESC \
            LIMIT $1::INT8";
        Ok(self
            .query(SQL, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::testimonial::WithUser {
                testimonial: Testimonial {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    sport: row.get("sport"),
                    rating: row.get("rating"),
                    content: row.get("content"),
                    is_featured: row.get("is_featured"),
                    created_at: row.get("created_at"),
                },
                name: row.get("name"),
            })
            .collect())
    }
}
