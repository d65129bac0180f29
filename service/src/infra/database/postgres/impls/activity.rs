//! [`ActivityLog`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::ActivityLog,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<ActivityLog>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<ActivityLog>,
    ) -> Result<Self::Ok, Self::Err> {
        let ActivityLog {
            id,
            user_id,
            kind,
            detail,
            created_at,
        } = entry;

        const SQL: &str = "\
            INSERT INTO activity_log (\
                id, user_id, kind, detail, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT2, $4::VARCHAR, $5::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &user_id, &kind, &detail, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<Vec<read::activity::WithUser>, read::activity::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::activity::WithUser>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::activity::WithUser>, read::activity::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::activity::Selector { limit } = by.into_inner();

        const SQL: &str = "\
            SELECT a.id, a.user_id, a.kind, a.detail, a.created_at, u.name \
            FROM activity_log AS a \
            LEFT JOIN users AS u ON u.id = a.user_id \
            ORDER BY a.created_at DESC \
            LIMIT $1::INT8";
        Ok(self
            .query(SQL, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::activity::WithUser {
                entry: ActivityLog {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    kind: row.get("kind"),
                    detail: row.get("detail"),
                    created_at: row.get("created_at"),
                },
                name: row.get("name"),
            })
            .collect())
    }
}
