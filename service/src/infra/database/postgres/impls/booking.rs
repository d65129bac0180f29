//! [`Booking`]-related [`Database`] implementations.

use common::{
    money::Currency,
    operations::{By, Insert, Select, Update},
    Date, Money,
};
use postgres_types::Json;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, Payment, Status},
        schedule::{self, Slot},
        Booking,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns selected for a [`Booking`] row.
const COLUMNS: &str = "\
    b.id, b.user_id, b.sport, b.date, b.start_time, b.end_time, \
    b.is_team, b.amount, b.status, b.notes, b.admin_notes, b.payment, \
    b.created_at, b.updated_at";

/// Maps a [`Row`] of [`COLUMNS`] into a [`Booking`].
fn from_row(row: &Row) -> Booking {
    Booking {
        id: row.get("id"),
        user_id: row.get("user_id"),
        sport: row.get("sport"),
        date: row.get("date"),
        slot: Slot {
            start: row.get("start_time"),
            end: row.get("end_time"),
        },
        is_team: row.get("is_team"),
        amount: Money {
            amount: row.get("amount"),
            currency: Currency::Inr,
        },
        status: row.get("status"),
        notes: row.get("notes"),
        admin_notes: row.get("admin_notes"),
        payment: row
            .get::<_, Option<Json<Payment>>>("payment")
            .map(|Json(p)| p),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Insert<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            user_id,
            sport,
            date,
            slot,
            is_team,
            amount,
            status,
            notes,
            admin_notes,
            payment,
            created_at,
            updated_at,
        } = booking;
        let payment = payment.map(Json);

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, user_id, sport, date, start_time, end_time, \
                is_team, amount, status, notes, admin_notes, payment, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::DATE, $5::TIME, \
                $6::TIME, $7::BOOL, $8::NUMERIC, $9::INT2, $10::VARCHAR, \
                $11::VARCHAR, $12::JSONB, $13::TIMESTAMPTZ, \
                $14::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &sport,
                &date,
                &slot.start,
                &slot.end,
                &is_team,
                &amount.amount,
                &status,
                &notes,
                &admin_notes,
                &payment,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            status,
            admin_notes,
            payment,
            updated_at,
            ..
        } = booking;
        let payment = payment.map(Json);

        const SQL: &str = "\
            UPDATE bookings \
            SET status = $2::INT2, \
                admin_notes = $3::VARCHAR, \
                payment = $4::JSONB, \
                updated_at = $5::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &status, &admin_notes, &payment, &updated_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM bookings AS b \
             WHERE b.id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<schedule::Occupied, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = schedule::Occupied;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<schedule::Occupied, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        let date = by.into_inner();

        const SQL: &str = "\
            SELECT start_time, end_time, sport \
            FROM bookings \
            WHERE date = $1::DATE \
              AND status = ANY(ARRAY[$2::INT2, $3::INT2])";
        Ok(self
            .query(SQL, &[&date, &Status::Pending, &Status::Confirmed])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                (
                    row.get("start_time"),
                    row.get("end_time"),
                    row.get("sport"),
                )
            })
            .collect())
    }
}

impl<C>
    Database<Select<By<Vec<read::booking::WithUser>, read::booking::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::booking::WithUser>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::booking::WithUser>, read::booking::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::booking::Selector;

        let selector = by.into_inner();

        let (filter, order) = clauses(&selector);
        let sql = format!(
            "SELECT {COLUMNS}, u.username, u.name \
             FROM bookings AS b \
             JOIN users AS u ON u.id = b.user_id \
             {filter} \
             {order}",
        );

        let rows = match selector {
            Selector::All => self.query(&sql, &[]).await,
            Selector::ForUser(user_id) => self.query(&sql, &[&user_id]).await,
            Selector::OnDate(date) | Selector::Upcoming { from: date } => {
                self.query(&sql, &[&date]).await
            }
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows
            .into_iter()
            .map(|row| read::booking::WithUser {
                booking: from_row(&row),
                username: row.get("username"),
                name: row.get("name"),
            })
            .collect())
    }
}

/// Returns the `WHERE` and `ORDER BY` clauses of the provided [`Selector`].
///
/// Whole-history listings come newest booked date first, with the placement
/// time breaking ties; per-date and upcoming listings come in calendar order.
///
/// [`Selector`]: read::booking::Selector
fn clauses(selector: &read::booking::Selector) -> (&'static str, &'static str) {
    use read::booking::Selector;

    match selector {
        Selector::All => ("", "ORDER BY b.date DESC, b.created_at DESC"),
        Selector::ForUser(_) => (
            "WHERE b.user_id = $1::UUID",
            "ORDER BY b.date DESC, b.created_at DESC",
        ),
        Selector::OnDate(_) => {
            ("WHERE b.date = $1::DATE", "ORDER BY b.start_time")
        }
        Selector::Upcoming { .. } => {
            ("WHERE b.date >= $1::DATE", "ORDER BY b.date, b.start_time")
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{domain::user, read::booking::Selector};

    use super::clauses;

    #[test]
    fn lists_histories_newest_date_first() {
        for selector in [Selector::All, Selector::ForUser(user::Id::new())] {
            let (_, order) = clauses(&selector);
            assert_eq!(order, "ORDER BY b.date DESC, b.created_at DESC");
        }
    }

    #[test]
    fn upcoming_spans_every_status() {
        let from = Date::parse("2025-08-27").unwrap();
        let (filter, order) = clauses(&Selector::Upcoming { from });

        assert_eq!(filter, "WHERE b.date >= $1::DATE");
        assert!(!filter.contains("status"));
        assert_eq!(order, "ORDER BY b.date, b.start_time");
    }
}
