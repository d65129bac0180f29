//! Registration and sign-in handlers.

use axum::{Extension, Json};
use http::StatusCode;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::User,
};

use crate::{AsError, Error, Service};

use super::parse;

/// Body of `POST /api/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Unique login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Plain-text password.
    pub password: String,

    /// Displayed name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Team the account plays for, if any.
    pub team_name: Option<String>,
}

/// Body of `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name of the account.
    pub username: String,

    /// Plain-text password.
    pub password: String,
}

/// Authenticated session returned by both registration and sign-in.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token of the session.
    pub token: String,

    /// Unix timestamp when the session expires.
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,

    /// Signed-in account.
    pub user: UserDto,
}

impl From<command::create_user_session::Output> for SessionResponse {
    fn from(out: command::create_user_session::Output) -> Self {
        Self {
            token: out.token.to_string(),
            expires_at: out.expires_at.unix_timestamp(),
            user: out.user.into(),
        }
    }
}

/// [`User`] representation of the API.
#[derive(Debug, Serialize)]
pub struct UserDto {
    /// ID of the account.
    pub id: service::domain::user::Id,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Displayed name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Team the account plays for, if any.
    pub team_name: Option<String>,

    /// Indicator whether the account has administrative privileges.
    pub is_admin: bool,

    /// RFC 3339 timestamp of the registration.
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            name: user.name.to_string(),
            phone: user.phone.to_string(),
            team_name: user.team_name.map(|t| t.to_string()),
            is_admin: user.is_admin,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// `POST /api/register` handler.
///
/// # Errors
///
/// - `400` on a malformed field, or an occupied username or email;
/// - `500` on an infrastructure failure.
pub async fn register(
    Extension(service): Extension<Service>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), Error> {
    let user = service
        .execute(command::CreateUser {
            username: parse("username", &req.username)?,
            email: parse("email", &req.email)?,
            password: SecretBox::new(Box::new(parse(
                "password",
                &req.password,
            )?)),
            name: parse("name", &req.name)?,
            phone: parse("phone", &req.phone)?,
            team_name: req
                .team_name
                .as_deref()
                .map(|t| parse("team_name", t))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    let session = service
        .execute(command::CreateUserSession::ByUserId(user.id))
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// `POST /api/login` handler.
///
/// # Errors
///
/// - `400` on a malformed field;
/// - `401` on wrong credentials;
/// - `500` on an infrastructure failure.
pub async fn login(
    Extension(service): Extension<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, Error> {
    let session = service
        .execute(command::CreateUserSession::ByCredentials {
            username: parse("username", &req.username)?,
            password: SecretBox::new(Box::new(parse(
                "password",
                &req.password,
            )?)),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(session.into()))
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UsernameTaken(_) => Some(Error {
                code: "USERNAME_TAKEN",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
            Self::EmailTaken(_) => Some(Error {
                code: "EMAIL_TAKEN",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::WrongCredentials => Some(Error {
                code: "INVALID_CREDENTIALS",
                status_code: http::StatusCode::UNAUTHORIZED,
                message: self.to_string(),
                backtrace: None,
            }),
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => None,
        }
    }
}
