//! Venue configuration handlers.

use axum::{extract::Path, Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{pricing::PriceTable, venue::SpecialOffer, VenueConfig},
    query,
};

use crate::{AdminAuth, AsError, Error, Service};

use super::parse;

/// [`VenueConfig`] representation of the API.
#[derive(Debug, Serialize)]
pub struct VenueDto {
    /// Displayed name of the venue.
    pub name: String,

    /// Free-form description of the venue.
    pub description: String,

    /// Contact phone of the venue.
    pub phone: String,

    /// Contact email of the venue.
    pub email: String,

    /// Postal address of the venue.
    pub address: String,

    /// Sports that can be booked at the venue.
    pub sports: Vec<String>,

    /// Price table the venue charges by.
    pub pricing: PriceTable,

    /// Gallery image URLs of the venue.
    pub images: Vec<String>,

    /// Currently advertised special offers.
    pub offers: Vec<SpecialOffer>,

    /// RFC 3339 timestamp of the last update.
    pub updated_at: String,
}

impl From<VenueConfig> for VenueDto {
    fn from(c: VenueConfig) -> Self {
        Self {
            name: c.name.to_string(),
            description: c.description,
            phone: c.phone.to_string(),
            email: c.email.to_string(),
            address: c.address,
            sports: c.sports.into_iter().map(|s| s.to_string()).collect(),
            pricing: c.pricing,
            images: c.images.into_iter().map(|i| i.to_string()).collect(),
            offers: c.offers,
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// `GET /api/turf` (and its `GET /api/turf-config` alias) handler.
///
/// # Errors
///
/// - `404` when the venue has never been configured;
/// - `500` on an infrastructure failure.
pub async fn config(
    Extension(service): Extension<Service>,
) -> Result<Json<VenueDto>, Error> {
    service
        .execute(query::venue::Config::by(()))
        .await
        .map_err(AsError::into_error)?
        .map(|c| Json(c.into()))
        .ok_or_else(venue_not_configured)
}

/// Body of `PUT /api/turf`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Displayed name of the venue.
    pub name: String,

    /// Free-form description of the venue.
    #[serde(default)]
    pub description: String,

    /// Contact phone of the venue.
    pub phone: String,

    /// Contact email of the venue.
    pub email: String,

    /// Postal address of the venue.
    #[serde(default)]
    pub address: String,

    /// Sports that can be booked at the venue.
    pub sports: Vec<String>,

    /// Price table the venue charges by.
    pub pricing: PriceTable,

    /// Gallery image URLs of the venue.
    #[serde(default)]
    pub images: Vec<String>,

    /// Advertised special offers.
    #[serde(default)]
    pub offers: Vec<SpecialOffer>,
}

/// `PUT /api/turf` handler.
///
/// Replaces the whole configuration, creating it on first use.
///
/// # Errors
///
/// - `400` on a malformed field;
/// - `401`/`403` when not an administrator;
/// - `500` on an infrastructure failure.
pub async fn update_config(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<VenueDto>, Error> {
    let config = service
        .execute(command::UpdateVenueConfig {
            name: parse("name", &req.name)?,
            description: req.description,
            phone: parse("phone", &req.phone)?,
            email: parse("email", &req.email)?,
            address: req.address,
            sports: req
                .sports
                .iter()
                .map(|s| parse("sports", s))
                .collect::<Result<_, _>>()?,
            pricing: req.pricing,
            images: req
                .images
                .iter()
                .map(|i| parse("images", i))
                .collect::<Result<_, _>>()?,
            offers: req.offers,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(config.into()))
}

/// Body of `POST /api/turf/images`.
#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    /// URL of the image to append to the gallery.
    pub url: String,
}

/// `POST /api/turf/images` handler.
///
/// # Errors
///
/// - `400` on a malformed URL, or one already in the gallery;
/// - `401`/`403` when not an administrator;
/// - `404` when the venue has never been configured;
/// - `500` on an infrastructure failure.
pub async fn add_image(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Json(req): Json<AddImageRequest>,
) -> Result<(StatusCode, Json<VenueDto>), Error> {
    let config = service
        .execute(command::AddVenueImage {
            url: parse("url", &req.url)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(config.into())))
}

/// `DELETE /api/turf/images/{index}` handler.
///
/// # Errors
///
/// - `401`/`403` when not an administrator;
/// - `404` on an unknown position, or when the venue has never been
///   configured;
/// - `500` on an infrastructure failure.
pub async fn remove_image(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Path(index): Path<usize>,
) -> Result<Json<VenueDto>, Error> {
    let config = service
        .execute(command::RemoveVenueImage { index })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(config.into()))
}

/// Body of `POST /api/turf/offers`.
#[derive(Debug, Deserialize)]
pub struct AddOfferRequest {
    /// Headline of the offer.
    pub title: String,

    /// Displayed details of the offer.
    pub description: String,

    /// Advertised discount of the offer.
    pub discount: String,

    /// `YYYY-MM-DD` first date the offer is valid on.
    pub valid_from: String,

    /// `YYYY-MM-DD` last date the offer is valid on.
    pub valid_until: String,
}

/// `POST /api/turf/offers` handler.
///
/// # Errors
///
/// - `400` on a malformed, inverted or already passed validity period;
/// - `401`/`403` when not an administrator;
/// - `404` when the venue has never been configured;
/// - `500` on an infrastructure failure.
pub async fn add_offer(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Json(req): Json<AddOfferRequest>,
) -> Result<(StatusCode, Json<VenueDto>), Error> {
    let config = service
        .execute(command::AddSpecialOffer {
            offer: SpecialOffer {
                title: req.title,
                description: req.description,
                discount: req.discount,
                valid_from: parse("valid_from", &req.valid_from)?,
                valid_until: parse("valid_until", &req.valid_until)?,
            },
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(config.into())))
}

/// `DELETE /api/turf/offers/{index}` handler.
///
/// # Errors
///
/// - `401`/`403` when not an administrator;
/// - `404` on an unknown position, or when the venue has never been
///   configured;
/// - `500` on an infrastructure failure.
pub async fn remove_offer(
    AdminAuth(_): AdminAuth,
    Extension(service): Extension<Service>,
    Path(index): Path<usize>,
) -> Result<Json<VenueDto>, Error> {
    let config = service
        .execute(command::RemoveSpecialOffer { index })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(config.into()))
}

/// Builds the `404` [`Error`] of an unconfigured venue.
fn venue_not_configured() -> Error {
    Error {
        code: "VENUE_NOT_CONFIGURED",
        status_code: http::StatusCode::NOT_FOUND,
        message: "Venue is not configured".to_owned(),
        backtrace: None,
    }
}

impl AsError for command::update_venue_config::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::add_venue_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotConfigured => Some(venue_not_configured()),
            Self::DuplicateImage(_) => Some(Error {
                code: "DUPLICATE_IMAGE",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::remove_venue_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotConfigured => Some(venue_not_configured()),
            Self::NoSuchImage(_) => Some(Error {
                code: "NO_SUCH_IMAGE",
                status_code: http::StatusCode::NOT_FOUND,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::add_special_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotConfigured => Some(venue_not_configured()),
            Self::InvalidValidity { .. } => Some(Error {
                code: "INVALID_OFFER_VALIDITY",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
            Self::AlreadyExpired(_) => Some(Error {
                code: "OFFER_EXPIRED",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::remove_special_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotConfigured => Some(venue_not_configured()),
            Self::NoSuchOffer(_) => Some(Error {
                code: "NO_SUCH_OFFER",
                status_code: http::StatusCode::NOT_FOUND,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}
