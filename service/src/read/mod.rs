//! Read models of listing and dashboard views.

pub mod activity;
pub mod booking;
pub mod stats;
pub mod testimonial;
