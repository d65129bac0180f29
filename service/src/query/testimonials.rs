//! [`Query`] collection related to [`Testimonial`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Testimonial, Query};

use super::DatabaseQuery;

/// Queries a list of [`Testimonial`]s with their author attached,
/// featured ones first.
pub type List = DatabaseQuery<
    By<Vec<read::testimonial::WithUser>, read::testimonial::Selector>,
>;
