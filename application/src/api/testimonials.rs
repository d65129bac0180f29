//! Testimonial handlers.

use axum::{extract::Query as UrlQuery, Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{testimonial, Testimonial},
    query, read,
};

use crate::{AsError, Auth, Error, Service};

use super::parse;

/// Body of `POST /api/testimonials`.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Sport the testimonial is about.
    pub sport: String,

    /// Star rating between 1 and 5.
    pub rating: i16,

    /// Text of the testimonial.
    pub comment: String,
}

/// Query string of `GET /api/testimonials`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of testimonials to return.
    pub limit: Option<i64>,
}

/// [`Testimonial`] representation of the API.
#[derive(Debug, Serialize)]
pub struct TestimonialDto {
    /// ID of the testimonial.
    pub id: testimonial::Id,

    /// Sport the testimonial is about.
    pub sport: String,

    /// Star rating between 1 and 5.
    pub rating: i16,

    /// Text of the testimonial.
    pub comment: String,

    /// Indicator whether the testimonial is pinned first in listings.
    pub is_featured: bool,

    /// RFC 3339 timestamp of the submission.
    pub created_at: String,
}

impl From<Testimonial> for TestimonialDto {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            sport: t.sport.to_string(),
            rating: t.rating.into(),
            comment: t.content.to_string(),
            is_featured: t.is_featured,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// [`Testimonial`] along with its author, as publicly listed.
#[derive(Debug, Serialize)]
pub struct TestimonialWithUserDto {
    /// Testimonial itself.
    #[serde(flatten)]
    pub testimonial: TestimonialDto,

    /// Displayed name of the author.
    pub name: String,

    /// Generated avatar URL of the author.
    pub avatar: String,
}

impl From<read::testimonial::WithUser> for TestimonialWithUserDto {
    fn from(t: read::testimonial::WithUser) -> Self {
        let avatar = t.avatar_url();
        Self {
            testimonial: t.testimonial.into(),
            name: t.name.to_string(),
            avatar,
        }
    }
}

/// `POST /api/testimonials` handler.
///
/// # Errors
///
/// - `400` on a malformed field, or when the account already reviewed the
///   sport;
/// - `401` when unauthenticated;
/// - `500` on an infrastructure failure.
pub async fn create(
    Auth(session): Auth,
    Extension(service): Extension<Service>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<TestimonialDto>), Error> {
    let rating = testimonial::Rating::new(req.rating).ok_or_else(|| {
        Error::bad_request(&"`rating` must be between 1 and 5")
    })?;

    let testimonial = service
        .execute(command::CreateTestimonial {
            user_id: session.user_id,
            sport: parse("sport", &req.sport)?,
            rating,
            content: parse("comment", &req.comment)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(testimonial.into())))
}

/// `GET /api/testimonials` handler.
///
/// # Errors
///
/// `500` on an infrastructure failure.
pub async fn list(
    Extension(service): Extension<Service>,
    UrlQuery(q): UrlQuery<ListQuery>,
) -> Result<Json<Vec<TestimonialWithUserDto>>, Error> {
    let selector = q.limit.map_or_else(
        read::testimonial::Selector::default,
        |limit| read::testimonial::Selector { limit },
    );

    service
        .execute(query::testimonials::List::by(selector))
        .await
        .map(|ts| Json(ts.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_testimonial::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AlreadyReviewed(_) => Some(Error {
                code: "ALREADY_REVIEWED",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}
