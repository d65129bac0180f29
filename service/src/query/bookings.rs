//! [`Query`] collection related to [`Booking`]s.

use common::operations::By;

use crate::{
    domain::{booking, Booking},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Booking`] by its [`booking::Id`].
pub type ById = DatabaseQuery<By<Option<Booking>, booking::Id>>;

/// Queries a list of [`Booking`]s with their booker attached.
pub type List =
    DatabaseQuery<By<Vec<read::booking::WithUser>, read::booking::Selector>>;
