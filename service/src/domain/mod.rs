//! Domain entities.

pub mod activity;
pub mod booking;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod testimonial;
pub mod user;
pub mod venue;

pub use self::{
    activity::ActivityLog, booking::Booking, pricing::Quote,
    testimonial::Testimonial, user::User, venue::VenueConfig,
};
