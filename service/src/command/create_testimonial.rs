//! [`Command`] for leaving a [`Testimonial`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        activity,
        booking::Sport,
        testimonial::{self, Content, Rating},
        user, ActivityLog, Testimonial,
    },
    infra::{
        database::{self, constraint},
        Database,
    },
    Service,
};

use super::Command;

/// [`Command`] for leaving a [`Testimonial`].
#[derive(Clone, Debug)]
pub struct CreateTestimonial {
    /// ID of the [`User`] leaving the [`Testimonial`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`Sport`] the [`Testimonial`] is about.
    pub sport: Sport,

    /// [`Rating`] given by the [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub rating: Rating,

    /// [`Content`] of the [`Testimonial`].
    pub content: Content,
}

impl<Db> Command<CreateTestimonial> for Service<Db>
where
    Db: Database<Insert<Testimonial>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<ActivityLog>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Testimonial;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTestimonial,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTestimonial {
            user_id,
            sport,
            rating,
            content,
        } = cmd;

        let testimonial = Testimonial {
            id: testimonial::Id::new(),
            user_id,
            sport,
            rating,
            content,
            is_featured: false,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(testimonial.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some(
                    constraint::TESTIMONIAL_USER_SPORT,
                )) {
                    tracerr::new!(E::AlreadyReviewed(
                        testimonial.sport.clone(),
                    ))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        self.database()
            .execute(Insert(ActivityLog {
                id: activity::Id::new(),
                user_id: Some(user_id),
                kind: activity::Kind::TestimonialLeft,
                detail: format!(
                    "A {}-star review of {} came in",
                    testimonial.rating, testimonial.sport,
                ),
                created_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(testimonial)
    }
}

/// Error of [`CreateTestimonial`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] has already reviewed this [`Sport`].
    ///
    /// [`User`]: crate::domain::User
    #[display("`{_0}` has already been reviewed by this `User`")]
    #[from(ignore)]
    AlreadyReviewed(#[error(not(source))] Sport),
}
