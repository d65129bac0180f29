//! [`Testimonial`] read models.

use crate::domain::{user, Testimonial};

/// [`Testimonial`] along with the [`User`] who left it.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct WithUser {
    /// [`Testimonial`] itself.
    pub testimonial: Testimonial,

    /// Displayed [`Name`] of the [`User`] who left the [`Testimonial`].
    ///
    /// [`Name`]: user::Name
    /// [`User`]: crate::domain::User
    pub name: user::Name,
}

impl WithUser {
    /// Returns the generated avatar URL displayed next to this
    /// [`Testimonial`].
    #[must_use]
    pub fn avatar_url(&self) -> String {
        format!(
            "https://ui-avatars.com/api/?name={}&background=10b981&color=fff",
            urlencoding::encode(self.name.as_ref()),
        )
    }
}

/// Selector of a [`Testimonial`] listing.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    /// Maximum number of [`Testimonial`]s to return.
    pub limit: i64,
}

impl Default for Selector {
    fn default() -> Self {
        Self { limit: 6 }
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::WithUser;
    use crate::domain::{booking::Sport, testimonial, user, Testimonial};

    #[test]
    fn avatar_url_encodes_the_name() {
        let with_user = WithUser {
            testimonial: Testimonial {
                id: testimonial::Id::new(),
                user_id: user::Id::new(),
                sport: Sport::new("Football").unwrap(),
                rating: testimonial::Rating::new(5).unwrap(),
                content: testimonial::Content::new("Great turf.").unwrap(),
                is_featured: false,
                created_at: DateTime::now().coerce(),
            },
            name: user::Name::new("Rahul Sharma").unwrap(),
        };

        assert_eq!(
            with_user.avatar_url(),
            "https://ui-avatars.com/api/?name=Rahul%20Sharma\
             &background=10b981&color=fff",
        );
    }
}
