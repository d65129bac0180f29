//! [UPI] payment link generation and verification handlers.
//!
//! [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface

use axum::{Extension, Json};
use common::{money::Currency, Money};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{booking, payment},
};

use crate::{AsError, Auth, Error, Service};

use super::{bookings::BookingDto, parse};

/// Body of `POST /api/initiate-payment`.
#[derive(Debug, Deserialize)]
pub struct InitiateRequest {
    /// Amount to collect, in whole rupees.
    pub amount: i64,

    /// Human-readable transaction note, usually naming the booking.
    #[serde(rename = "bookingDetails")]
    pub booking_details: Option<String>,
}

/// Response of `POST /api/initiate-payment`.
#[derive(Debug, Serialize)]
pub struct InitiateResponse {
    /// Per-app payment deep links.
    pub links: payment::Links,

    /// Merchant the amount is payable to.
    pub merchant: payment::UpiDetails,
}

/// `POST /api/initiate-payment` handler.
///
/// Pure string construction; nothing is persisted.
///
/// # Errors
///
/// - `400` on a non-positive amount;
/// - `401` when unauthenticated.
pub async fn initiate(
    Auth(_): Auth,
    Extension(service): Extension<Service>,
    Json(req): Json<InitiateRequest>,
) -> Result<Json<InitiateResponse>, Error> {
    if req.amount <= 0 {
        return Err(Error::bad_request(&"`amount` must be positive"));
    }

    let upi = &service.config().upi;
    let note = req.booking_details.as_deref().unwrap_or("Turf booking");

    Ok(Json(InitiateResponse {
        links: payment::Links::build(
            upi,
            Money::from_units(req.amount, Currency::Inr),
            note,
        ),
        merchant: upi.clone(),
    }))
}

/// Body of `POST /api/verify-payment`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// ID of the paid booking.
    #[serde(rename = "bookingId")]
    pub booking_id: booking::Id,

    /// Transaction reference reported by the payer.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,

    /// Paid amount, in whole rupees.
    pub amount: i64,
}

/// `POST /api/verify-payment` handler.
///
/// Records the reported payment on the booking and confirms it.
///
/// # Errors
///
/// - `400` on a malformed transaction reference or a non-positive amount;
/// - `401` when unauthenticated;
/// - `404` on an unknown booking;
/// - `500` on an infrastructure failure.
pub async fn verify(
    Auth(_): Auth,
    Extension(service): Extension<Service>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<BookingDto>, Error> {
    if req.amount <= 0 {
        return Err(Error::bad_request(&"`amount` must be positive"));
    }

    let booking = service
        .execute(command::ConfirmPayment {
            id: req.booking_id,
            reference: parse("transactionId", &req.transaction_id)?,
            amount: Money::from_units(req.amount, Currency::Inr),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(booking.into()))
}

impl AsError for command::confirm_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(Error {
                code: "BOOKING_NOT_EXISTS",
                status_code: http::StatusCode::NOT_FOUND,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}
