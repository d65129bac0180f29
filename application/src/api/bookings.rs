//! Slot availability, pricing and booking handlers.

use axum::{
    extract::{Path, Query as UrlQuery},
    Extension, Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{booking, schedule, Booking},
    query,
    read,
};

use crate::{AdminAuth, AsError, Auth, Error, Service};

use super::parse;

/// Query string of `GET /api/available-slots`.
#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    /// `YYYY-MM-DD` date to list slots for.
    pub date: Option<String>,
}

/// Single bookable slot of `GET /api/available-slots`.
#[derive(Debug, Serialize)]
pub struct SlotDto {
    /// `HH:MM` start of the slot.
    pub start_time: String,

    /// `HH:MM` end of the slot.
    pub end_time: String,

    /// Sports the slot can still be booked for.
    pub sports: Vec<String>,
}

impl From<schedule::AvailableSlot> for SlotDto {
    fn from(s: schedule::AvailableSlot) -> Self {
        Self {
            start_time: s.slot.start.to_string(),
            end_time: s.slot.end.to_string(),
            sports: s.sports.into_iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `GET /api/available-slots` handler.
///
/// # Errors
///
/// - `400` on a missing or unparseable date;
/// - `500` when the venue is not configured.
pub async fn available_slots(
    Extension(service): Extension<Service>,
    UrlQuery(q): UrlQuery<AvailableSlotsQuery>,
) -> Result<Json<Vec<SlotDto>>, Error> {
    let date = q
        .date
        .as_deref()
        .ok_or_else(|| Error::bad_request(&"missing `date` parameter"))?;

    let slots = service
        .execute(query::availability::AvailableSlots {
            date: parse("date", date)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

/// Body of `POST /api/calculate-price`.
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    /// Sport to price.
    pub sport: String,

    /// `YYYY-MM-DD` date to price.
    pub date: String,

    /// `HH:MM - HH:MM` slot to price.
    #[serde(rename = "timeSlot")]
    pub time_slot: String,

    /// Indicator whether the booking is made on behalf of a team.
    #[serde(default)]
    pub team: bool,
}

/// Response of `POST /api/calculate-price`.
#[derive(Debug, Serialize)]
pub struct QuoteDto {
    /// Undiscounted slot price in whole rupees.
    #[serde(rename = "basePrice")]
    pub base_price: i64,

    /// Discounts applied against the base price.
    pub discounts: Vec<DiscountDto>,

    /// Amount due in whole rupees.
    #[serde(rename = "finalAmount")]
    pub final_amount: i64,

    /// Merchant the amount is payable to.
    pub upi: UpiDto,
}

/// Single applied discount of a [`QuoteDto`].
#[derive(Debug, Serialize)]
pub struct DiscountDto {
    /// Displayed name of the discount rule.
    pub name: String,

    /// Displayed explanation of the discount rule.
    pub description: String,

    /// Discounted amount in whole rupees.
    pub amount: i64,
}

/// [UPI] merchant details of a [`QuoteDto`].
///
/// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
#[derive(Debug, Serialize)]
pub struct UpiDto {
    /// Virtual payment address of the merchant.
    pub address: String,

    /// Displayed payee name of the merchant.
    pub payee_name: String,
}

/// `POST /api/calculate-price` handler.
///
/// # Errors
///
/// - `400` on a malformed field or an unknown sport;
/// - `401` when unauthenticated;
/// - `500` when the venue pricing is not configured.
pub async fn calculate_price(
    Auth(_): Auth,
    Extension(service): Extension<Service>,
    Json(req): Json<PriceRequest>,
) -> Result<Json<QuoteDto>, Error> {
    let slot: schedule::Slot = parse("timeSlot", &req.time_slot)?;

    let out = service
        .execute(query::quote::Quote {
            sport: parse("sport", &req.sport)?,
            date: parse("date", &req.date)?,
            start: slot.start,
            is_team: req.team,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(QuoteDto {
        base_price: units(out.quote.base_price),
        discounts: out
            .quote
            .discounts
            .into_iter()
            .map(|d| DiscountDto {
                name: d.rule.to_string(),
                description: d.rule.description().to_owned(),
                amount: units(d.amount),
            })
            .collect(),
        final_amount: units(out.quote.final_amount),
        upi: UpiDto {
            address: out.upi.address.to_string(),
            payee_name: out.upi.payee_name,
        },
    }))
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Sport to book.
    pub sport: String,

    /// `YYYY-MM-DD` date to book.
    pub booking_date: String,

    /// `HH:MM` start of the slot to book.
    pub start_time: String,

    /// `HH:MM` end of the slot to book.
    pub end_time: String,

    /// Team to record on the account, making this a team booking.
    pub team_name: Option<String>,

    /// Free-form notes for the administrators.
    pub notes: Option<String>,
}

/// [`Booking`] representation of the API.
#[derive(Debug, Serialize)]
pub struct BookingDto {
    /// ID of the booking.
    pub id: booking::Id,

    /// ID of the account that placed the booking.
    pub user_id: service::domain::user::Id,

    /// Booked sport.
    pub sport: String,

    /// `YYYY-MM-DD` booked date.
    pub booking_date: String,

    /// `HH:MM` start of the booked slot.
    pub start_time: String,

    /// `HH:MM` end of the booked slot.
    pub end_time: String,

    /// Indicator whether the booking is made on behalf of a team.
    pub is_team: bool,

    /// Amount due in whole rupees.
    pub amount: i64,

    /// Lifecycle status of the booking.
    pub status: String,

    /// Free-form notes left by the booker, if any.
    pub notes: Option<String>,

    /// Notes left by an administrator, if any.
    pub admin_notes: Option<String>,

    /// Payment received for the booking, if any.
    pub payment: Option<PaymentDto>,

    /// RFC 3339 timestamp of the placement.
    pub created_at: String,

    /// RFC 3339 timestamp of the last update.
    pub updated_at: String,
}

/// Payment received for a [`BookingDto`].
#[derive(Debug, Serialize)]
pub struct PaymentDto {
    /// Transaction reference reported by the payer.
    pub reference: String,

    /// Paid amount, in whole rupees.
    pub amount: i64,

    /// Unix timestamp when the payment was reported.
    pub received_at: i64,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            sport: b.sport.to_string(),
            booking_date: b.date.to_string(),
            start_time: b.slot.start.to_string(),
            end_time: b.slot.end.to_string(),
            is_team: b.is_team,
            amount: units(b.amount),
            status: b.status.to_string(),
            notes: b.notes.map(|n| n.to_string()),
            admin_notes: b.admin_notes.map(|n| n.to_string()),
            payment: b.payment.map(|p| PaymentDto {
                reference: p.reference.to_string(),
                amount: units(p.amount),
                received_at: p.received_at.unix_timestamp(),
            }),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// [`Booking`] along with its booker, as listed to administrators.
#[derive(Debug, Serialize)]
pub struct BookingWithUserDto {
    /// Booking itself.
    #[serde(flatten)]
    pub booking: BookingDto,

    /// Login name of the booker.
    pub username: String,

    /// Displayed name of the booker.
    pub name: String,
}

impl From<read::booking::WithUser> for BookingWithUserDto {
    fn from(b: read::booking::WithUser) -> Self {
        Self {
            booking: b.booking.into(),
            username: b.username.to_string(),
            name: b.name.to_string(),
        }
    }
}

/// `POST /api/bookings` handler.
///
/// # Errors
///
/// - `400` on a malformed field or an already started slot;
/// - `401` when unauthenticated;
/// - `404` on an unknown sport or slot;
/// - `409` when the slot is already booked;
/// - `500` on an infrastructure failure.
pub async fn create(
    Auth(session): Auth,
    Extension(service): Extension<Service>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>), Error> {
    let booking = service
        .execute(command::CreateBooking {
            user_id: session.user_id,
            sport: parse("sport", &req.sport)?,
            date: parse("booking_date", &req.booking_date)?,
            slot: schedule::Slot {
                start: parse("start_time", &req.start_time)?,
                end: parse("end_time", &req.end_time)?,
            },
            team_name: req
                .team_name
                .as_deref()
                .map(|t| parse("team_name", t))
                .transpose()?,
            notes: req
                .notes
                .as_deref()
                .map(|n| parse("notes", n))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// `GET /api/bookings` handler.
///
/// # Errors
///
/// - `401`/`403` when not an administrator;
/// - `500` on an infrastructure failure.
pub async fn list_all(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<BookingWithUserDto>>, Error> {
    list(&service, read::booking::Selector::All).await
}

/// `GET /api/bookings/user` handler.
///
/// # Errors
///
/// - `401` when unauthenticated;
/// - `500` on an infrastructure failure.
pub async fn list_own(
    Auth(session): Auth,
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<BookingWithUserDto>>, Error> {
    list(&service, read::booking::Selector::ForUser(session.user_id)).await
}

/// `GET /api/bookings/date/{date}` handler.
///
/// Public, so the booking form can grey out taken slots without a login.
///
/// # Errors
///
/// - `400` on an unparseable date;
/// - `500` on an infrastructure failure.
pub async fn list_on_date(
    Extension(service): Extension<Service>,
    Path(date): Path<String>,
) -> Result<Json<Vec<BookingWithUserDto>>, Error> {
    list(&service, read::booking::Selector::OnDate(parse("date", &date)?))
        .await
}

/// `GET /api/bookings/upcoming` handler.
///
/// Public, like [`list_on_date`].
///
/// # Errors
///
/// - `500` on an infrastructure failure.
pub async fn list_upcoming(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<BookingWithUserDto>>, Error> {
    list(
        &service,
        read::booking::Selector::Upcoming {
            from: common::DateTime::now().date(),
        },
    )
    .await
}

/// Runs a [`Booking`] listing with the provided [`Selector`].
///
/// [`Selector`]: read::booking::Selector
async fn list(
    service: &Service,
    selector: read::booking::Selector,
) -> Result<Json<Vec<BookingWithUserDto>>, Error> {
    service
        .execute(query::bookings::List::by(selector))
        .await
        .map(|bookings| {
            Json(bookings.into_iter().map(Into::into).collect())
        })
        .map_err(AsError::into_error)
}

/// Body of `PUT /api/bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New lifecycle status (`PENDING`, `CONFIRMED`, `CANCELLED` or
    /// `REJECTED`).
    pub status: String,

    /// Notes to leave on the booking, replacing the present ones.
    pub admin_notes: Option<String>,
}

/// `PUT /api/bookings/{id}/status` handler.
///
/// # Errors
///
/// - `400` on an unknown status;
/// - `401`/`403` when not an administrator;
/// - `404` on an unknown booking;
/// - `500` on an infrastructure failure.
pub async fn update_status(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Path(id): Path<booking::Id>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BookingDto>, Error> {
    let booking = service
        .execute(command::UpdateBookingStatus {
            id,
            status: parse("status", &req.status)?,
            admin_notes: req
                .admin_notes
                .as_deref()
                .map(|n| parse("admin_notes", n))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(booking.into()))
}

/// Returns the whole-rupee units of the given amount.
///
/// Quoted amounts are truncated to whole rupees by construction.
fn units(m: common::Money) -> i64 {
    m.as_units().unwrap_or_default()
}

impl AsError for command::create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let (code, status_code) = match self {
            Self::Db(e) => return e.try_as_error(),
            Self::VenueNotConfigured => {
                ("VENUE_NOT_CONFIGURED", http::StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::PricingNotConfigured(_) => (
                "PRICING_NOT_CONFIGURED",
                http::StatusCode::INTERNAL_SERVER_ERROR,
            ),
            Self::UnknownSport(_) => {
                ("UNKNOWN_SPORT", http::StatusCode::NOT_FOUND)
            }
            Self::UnknownSlot(_) => {
                ("UNKNOWN_SLOT", http::StatusCode::NOT_FOUND)
            }
            Self::SlotInPast(_) => {
                ("SLOT_IN_PAST", http::StatusCode::BAD_REQUEST)
            }
            Self::SlotTaken(_) => ("SLOT_TAKEN", http::StatusCode::CONFLICT),
            Self::UserNotExists(_) => {
                ("USER_NOT_EXISTS", http::StatusCode::NOT_FOUND)
            }
        };

        Some(Error {
            code,
            status_code,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for command::update_booking_status::ExecutionError {
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

impl AsError for query::availability::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotConfigured => Some(Error {
                code: "VENUE_NOT_CONFIGURED",
                status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for query::quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let (code, status_code) = match self {
            Self::Db(e) => return e.try_as_error(),
            Self::VenueNotConfigured => {
                ("VENUE_NOT_CONFIGURED", http::StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::PricingNotConfigured(_) => (
                "PRICING_NOT_CONFIGURED",
                http::StatusCode::INTERNAL_SERVER_ERROR,
            ),
            Self::UnknownSport(_) => {
                ("UNKNOWN_SPORT", http::StatusCode::BAD_REQUEST)
            }
        };

        Some(Error {
            code,
            status_code,
            message: self.to_string(),
            backtrace: None,
        })
    }
}
