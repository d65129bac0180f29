//! Aggregated counter [`Database`] implementations.

use common::{
    operations::{By, Select},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::booking::Status,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::stats::Counters, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::stats::Counters;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::stats::Counters, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT (SELECT COUNT(*) FROM bookings)::INT8 \
                       AS total_bookings, \
                   (SELECT COUNT(*) FROM users WHERE NOT is_admin)::INT8 \
                       AS registered_users, \
                   (SELECT AVG(rating) FROM testimonials)::NUMERIC \
                       AS average_rating";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let row = row.expect("always exists");
                read::stats::Counters {
                    total_bookings: row.get("total_bookings"),
                    registered_users: row.get("registered_users"),
                    average_rating: row.get("average_rating"),
                }
            })
    }
}

impl<C> Database<Select<By<read::stats::BookingTotals, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::stats::BookingTotals;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::stats::BookingTotals, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        let today = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 AS total, \
                   COUNT(*) FILTER (WHERE status = $1::INT2)::INT8 \
                       AS pending, \
                   COUNT(*) FILTER (WHERE status = $2::INT2)::INT8 \
                       AS confirmed, \
                   COUNT(*) FILTER (WHERE status = $3::INT2)::INT8 \
                       AS cancelled, \
                   COUNT(*) FILTER (WHERE status = $4::INT2)::INT8 \
                       AS rejected, \
                   COUNT(*) FILTER (\
                       WHERE status = $2::INT2 AND date = $5::DATE\
                   )::INT8 AS confirmed_today, \
                   COALESCE(\
                       SUM(amount) FILTER (WHERE status = $2::INT2), 0\
                   )::NUMERIC AS revenue \
            FROM bookings";
        self.query_opt(
            SQL,
            &[
                &Status::Pending,
                &Status::Confirmed,
                &Status::Cancelled,
                &Status::Rejected,
                &today,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| {
            let row = row.expect("always exists");
            read::stats::BookingTotals {
                total: row.get("total"),
                pending: row.get("pending"),
                confirmed: row.get("confirmed"),
                cancelled: row.get("cancelled"),
                rejected: row.get("rejected"),
                confirmed_today: row.get("confirmed_today"),
                revenue: row.get("revenue"),
            }
        })
    }
}

impl<C> Database<Select<By<Vec<read::stats::MonthLoad>, read::stats::MonthSpan>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::stats::MonthLoad>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::stats::MonthLoad>, read::stats::MonthSpan>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let span = by.into_inner();

        const SQL: &str = "\
            SELECT DATE_TRUNC('month', date)::DATE AS month, \
                   COUNT(*)::INT8 AS bookings, \
                   COALESCE(\
                       SUM(amount) FILTER (WHERE status = $2::INT2), 0\
                   )::NUMERIC AS revenue \
            FROM bookings \
            WHERE date >= $1::DATE \
            GROUP BY month \
            ORDER BY month";
        Ok(self
            .query(SQL, &[&span.from, &Status::Confirmed])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::stats::MonthLoad {
                month: row.get("month"),
                bookings: row.get("bookings"),
                revenue: row.get("revenue"),
            })
            .collect())
    }
}
