//! [`Query`] collection related to the activity log.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::ActivityLog, Query};

use super::DatabaseQuery;

/// Queries the most recent [`ActivityLog`] entries, newest first.
pub type List =
    DatabaseQuery<By<Vec<read::activity::WithUser>, read::activity::Selector>>;
