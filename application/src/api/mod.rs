//! REST API definition.

pub mod bookings;
pub mod payments;
pub mod stats;
pub mod testimonials;
pub mod users;
pub mod venue;

use std::{fmt, str::FromStr};

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::Error;

/// Builds the [`Router`] serving the API.
///
/// Expects a [`Service`] to be provided as an [`Extension`] layer.
///
/// [`Extension`]: axum::Extension
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/api/register", post(users::register))
        .route("/api/login", post(users::login))
        .route("/api/available-slots", get(bookings::available_slots))
        .route("/api/calculate-price", post(bookings::calculate_price))
        .route(
            "/api/bookings",
            get(bookings::list_all).post(bookings::create),
        )
        .route("/api/bookings/user", get(bookings::list_own))
        .route("/api/bookings/date/:date", get(bookings::list_on_date))
        .route("/api/bookings/upcoming", get(bookings::list_upcoming))
        .route("/api/bookings/:id/status", put(bookings::update_status))
        .route("/api/turf", get(venue::config).put(venue::update_config))
        .route("/api/turf-config", get(venue::config))
        .route("/api/turf/images", post(venue::add_image))
        .route("/api/turf/images/:index", delete(venue::remove_image))
        .route("/api/turf/offers", post(venue::add_offer))
        .route("/api/turf/offers/:index", delete(venue::remove_offer))
        .route(
            "/api/testimonials",
            get(testimonials::list).post(testimonials::create),
        )
        .route("/api/live-activity", get(stats::live_activity))
        .route("/api/stats", get(stats::overview))
        .route("/api/quick-availability", get(stats::quick_availability))
        .route("/api/initiate-payment", post(payments::initiate))
        .route("/api/verify-payment", post(payments::verify))
        .route("/api/admin/booking-stats", get(stats::booking_stats))
}

/// Parses a request `field` into its domain type, mapping a failure to a
/// `400 Bad Request` [`Error`] naming the field.
fn parse<T>(field: &'static str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e| {
        Error::bad_request(&format!("invalid `{field}`: {e}"))
    })
}
