//! [`Command`] definition.

pub mod add_special_offer;
pub mod add_venue_image;
pub mod authorize_user_session;
pub mod confirm_payment;
pub mod create_booking;
pub mod create_testimonial;
pub mod create_user;
pub mod create_user_session;
pub mod remove_special_offer;
pub mod remove_venue_image;
pub mod update_booking_status;
pub mod update_venue_config;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_special_offer::AddSpecialOffer, add_venue_image::AddVenueImage,
    authorize_user_session::AuthorizeUserSession,
    confirm_payment::ConfirmPayment, create_booking::CreateBooking,
    create_testimonial::CreateTestimonial, create_user::CreateUser,
    create_user_session::CreateUserSession,
    remove_special_offer::RemoveSpecialOffer,
    remove_venue_image::RemoveVenueImage,
    update_booking_status::UpdateBookingStatus,
    update_venue_config::UpdateVenueConfig,
};
