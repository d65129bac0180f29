//! [`Command`] for creating a new [`User`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password, Phone, TeamName, Username};
use crate::{
    domain::{activity, user, ActivityLog, User},
    infra::{
        database::{self, constraint},
        notification, Database,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Username`] of a new [`User`].
    pub username: user::Username,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// Displayed [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Phone`] of a new [`User`].
    pub phone: user::Phone,

    /// [`TeamName`] of a new [`User`], if any.
    pub team_name: Option<user::TeamName>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<Insert<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<ActivityLog>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            username,
            email,
            password,
            name,
            phone,
            team_name,
        } = cmd;

        let user = User {
            id: user::Id::new(),
            username,
            email,
            password_hash: user::PasswordHash::new(password.expose_secret()),
            name,
            phone,
            team_name,
            is_admin: false,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some(constraint::USER_USERNAME))
                {
                    tracerr::new!(E::UsernameTaken(user.username.clone()))
                } else if e
                    .as_ref()
                    .is_unique_violation(Some(constraint::USER_EMAIL))
                {
                    tracerr::new!(E::EmailTaken(user.email.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        self.database()
            .execute(Insert(ActivityLog {
                id: activity::Id::new(),
                user_id: Some(user.id),
                kind: activity::Kind::Registration,
                detail: format!("{} joined the turf", user.name),
                created_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.outbox().enqueue(notification::Message::Welcome {
            name: user.name.clone(),
            email: user.email.clone(),
        });

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Username`] is already occupied.
    #[display("`{_0}` username is already taken")]
    UsernameTaken(#[error(not(source))] user::Username),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is already registered")]
    EmailTaken(#[error(not(source))] user::Email),
}
