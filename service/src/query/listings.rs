//! [`Query`] collection related to the multiple [`Listing`]s.
//!
//! [`Listing`]: crate::domain::Listing

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::read;

use super::DatabaseQuery;

/// Queries a [`Page`] of [`Listing`]s matching a [`Selector`].
///
/// [`Listing`]: crate::domain::Listing
/// [`Page`]: read::listing::list::Page
/// [`Selector`]: read::listing::list::Selector
pub type List =
    DatabaseQuery<By<read::listing::list::Page, read::listing::list::Selector>>;
