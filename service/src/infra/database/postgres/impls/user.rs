//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns selected for a [`User`] row.
const COLUMNS: &str = "\
    id, username, email, password_hash, \
    name, phone, team_name, is_admin, created_at";

/// Maps a [`Row`] of [`COLUMNS`] into a [`User`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        name: row.get("name"),
        phone: row.get("phone"),
        team_name: row.get("team_name"),
        is_admin: row.get("is_admin"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            username,
            email,
            password_hash,
            name,
            phone,
            team_name,
            is_admin,
            created_at,
        } = user;

        const SQL: &str = "\
            INSERT INTO users (\
                id, username, email, password_hash, \
                name, phone, team_name, is_admin, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::BOOL, \
                $9::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &username,
                &email,
                &password_hash,
                &name,
                &phone,
                &team_name,
                &is_admin,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            email,
            password_hash,
            name,
            phone,
            team_name,
            ..
        } = user;

        const SQL: &str = "\
            UPDATE users \
            SET email = $2::VARCHAR, \
                password_hash = $3::VARCHAR, \
                name = $4::VARCHAR, \
                phone = $5::VARCHAR, \
                team_name = $6::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[&id, &email, &password_hash, &name, &phone, &team_name],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM users \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<'u, C> Database<Select<By<Option<User>, &'u user::Username>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'u user::Username>>,
    ) -> Result<Self::Ok, Self::Err> {
        let username = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM users \
             WHERE username = $1::VARCHAR \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&username])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}
