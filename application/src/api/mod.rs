//! GraphQL API definitions.

pub mod booking;
pub mod listing;
mod mutation;
mod query;
pub mod scalar;
pub mod user;
pub mod viewer;

use common::{PageLimit, PageNumber};

use crate::{define_error, Context, Error};

pub use self::{
    booking::Booking, listing::Listing, mutation::Mutation, query::Query,
    user::User, viewer::Viewer,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    Mutation,
    juniper::EmptySubscription<Context>,
>;

/// Parses a [`PageNumber`] out of a raw GraphQL `Int` argument.
pub(crate) fn page_number(page: i32) -> Result<PageNumber, Error> {
    u32::try_from(page)
        .ok()
        .and_then(PageNumber::new)
        .ok_or_else(|| PaginationError::Invalid.into())
}

/// Parses a [`PageLimit`] out of a raw GraphQL `Int` argument.
pub(crate) fn page_limit(limit: i32) -> Result<PageLimit, Error> {
    u32::try_from(limit)
        .ok()
        .and_then(PageLimit::new)
        .ok_or_else(|| PaginationError::Invalid.into())
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,
    }
}

#[cfg(test)]
mod spec {
    use super::{page_limit, page_number};

    #[test]
    fn page_arguments_must_be_positive() {
        assert!(page_number(1).is_ok());
        assert!(page_number(0).is_err());
        assert!(page_number(-3).is_err());

        assert!(page_limit(4).is_ok());
        assert!(page_limit(0).is_err());
        assert!(page_limit(101).is_err());
    }
}
