//! [`Query`] collection related to the [`VenueConfig`].

use common::operations::By;

use crate::domain::VenueConfig;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`VenueConfig`] singleton, if it has ever been written.
pub type Config = DatabaseQuery<By<Option<VenueConfig>, ()>>;
