//! Dashboard and landing-page statistic handlers.

use axum::{Extension, Json};
use common::DateTime;
use rust_decimal::prelude::ToPrimitive as _;
use serde::Serialize;
use service::{
    command::Command as _,
    domain::activity,
    query, read,
};

use crate::{AdminAuth, AsError, Error, Service};

/// Number of entries `GET /api/live-activity` returns.
const LIVE_ACTIVITY_LIMIT: i64 = 4;

/// Single entry of `GET /api/live-activity`.
#[derive(Debug, Serialize)]
pub struct ActivityDto {
    /// Human-readable description of what happened.
    pub detail: String,

    /// Displayed name of the account that triggered the entry, if known.
    pub name: Option<String>,

    /// Humanized relative age, like `5 minutes ago`.
    pub time: String,
}

/// `GET /api/live-activity` handler.
///
/// # Errors
///
/// `500` on an infrastructure failure.
pub async fn live_activity(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<ActivityDto>>, Error> {
    let now = DateTime::now();

    service
        .execute(query::activity::List::by(read::activity::Selector {
            limit: LIVE_ACTIVITY_LIMIT,
        }))
        .await
        .map(|entries| {
            Json(
                entries
                    .into_iter()
                    .map(|e| ActivityDto {
                        detail: e.entry.detail,
                        name: e.name.map(|n| n.to_string()),
                        time: activity::humanize_age(
                            now - e.entry.created_at.coerce(),
                        ),
                    })
                    .collect(),
            )
        })
        .map_err(AsError::into_error)
}

/// Response of `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct OverviewDto {
    /// Total number of bookings ever placed.
    pub total_bookings: i64,

    /// Number of registered customer accounts.
    pub total_customers: i64,

    /// Average testimonial rating, if any were left.
    pub average_rating: Option<f64>,

    /// Number of sports the venue offers.
    pub sports_offered: usize,
}

/// `GET /api/stats` handler.
///
/// # Errors
///
/// `500` on an infrastructure failure.
pub async fn overview(
    Extension(service): Extension<Service>,
) -> Result<Json<OverviewDto>, Error> {
    let counters = service
        .execute(query::stats::Overview)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(OverviewDto {
        total_bookings: counters.total_bookings,
        total_customers: counters.registered_users,
        average_rating: counters.average_rating.and_then(|r| r.to_f64()),
        sports_offered: counters.sports_offered,
    }))
}

/// Response of `GET /api/quick-availability`.
#[derive(Debug, Serialize)]
pub struct QuickAvailabilityDto {
    /// Today's remaining availability.
    pub today: DayDto,

    /// Tomorrow's availability.
    pub tomorrow: DayDto,

    /// Availability of the next Saturday.
    pub next_saturday: DayDto,
}

/// Availability of a single day.
#[derive(Debug, Serialize)]
pub struct DayDto {
    /// `YYYY-MM-DD` date of the day.
    pub date: String,

    /// Number of slots still having at least one bookable sport.
    pub free_slots: usize,
}

impl From<query::availability::DaySummary> for DayDto {
    fn from(d: query::availability::DaySummary) -> Self {
        Self {
            date: d.date.to_string(),
            free_slots: d.free_slots,
        }
    }
}

/// `GET /api/quick-availability` handler.
///
/// # Errors
///
/// `500` on an infrastructure failure or an unconfigured venue.
pub async fn quick_availability(
    Extension(service): Extension<Service>,
) -> Result<Json<QuickAvailabilityDto>, Error> {
    let days = service
        .execute(query::availability::QuickAvailability)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(QuickAvailabilityDto {
        today: days.today.into(),
        tomorrow: days.tomorrow.into(),
        next_saturday: days.next_saturday.into(),
    }))
}

/// Response of `GET /api/admin/booking-stats`.
#[derive(Debug, Serialize)]
pub struct BookingStatsDto {
    /// Total number of bookings.
    pub total: i64,

    /// Number of pending bookings.
    pub pending: i64,

    /// Number of confirmed bookings.
    pub confirmed: i64,

    /// Number of cancelled bookings.
    pub cancelled: i64,

    /// Number of rejected bookings.
    pub rejected: i64,

    /// Number of bookings confirmed for today.
    pub confirmed_today: i64,

    /// Summed amount of confirmed bookings, in rupees.
    pub revenue: f64,

    /// Per-month booking and revenue series, oldest first.
    pub months: Vec<MonthDto>,

    /// Gallery image URLs of the venue.
    pub images: Vec<String>,
}

/// Single month of a [`BookingStatsDto`] series.
#[derive(Debug, Serialize)]
pub struct MonthDto {
    /// `YYYY-MM-DD` first date of the month.
    pub month: String,

    /// Number of bookings placed for dates in the month.
    pub bookings: i64,

    /// Summed amount of confirmed bookings in the month, in rupees.
    pub revenue: f64,
}

/// `GET /api/admin/booking-stats` handler.
///
/// # Errors
///
/// - `401`/`403` when not an administrator;
/// - `500` on an infrastructure failure.
pub async fn booking_stats(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
) -> Result<Json<BookingStatsDto>, Error> {
    let out = service
        .execute(query::stats::BookingStats)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(BookingStatsDto {
        total: out.totals.total,
        pending: out.totals.pending,
        confirmed: out.totals.confirmed,
        cancelled: out.totals.cancelled,
        rejected: out.totals.rejected,
        confirmed_today: out.totals.confirmed_today,
        revenue: out.totals.revenue.to_f64().unwrap_or_default(),
        months: out
            .months
            .into_iter()
            .map(|m| MonthDto {
                month: m.month.to_string(),
                bookings: m.bookings,
                revenue: m.revenue.to_f64().unwrap_or_default(),
            })
            .collect(),
        images: out.images.into_iter().map(|i| i.to_string()).collect(),
    }))
}
