//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the profile of the `User` with the specified ID, together
    /// with one page of the listings they host and one page of the bookings
    /// they have made.
    ///
    /// The two page numbers are independent of each other.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `User` with the specified ID does not exist;
    /// - `INVALID_PAGINATION_ARGUMENTS` - a page or limit argument is not
    ///                                    positive.
    #[tracing::instrument(
        skip_all,
        fields(
            bookings_page = %bookings_page,
            gql.name = "user",
            id = %id,
            limit = %limit,
            listings_page = %listings_page,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        listings_page: i32,
        bookings_page: i32,
        limit: i32,
        ctx: &Context,
    ) -> Result<api::user::Profile, Error> {
        let output = ctx
            .service()
            .execute(query::user_page::ById {
                user_id: id.into(),
                listings_page: api::page_number(listings_page)
                    .map_err(ctx.error())?,
                bookings_page: api::page_number(bookings_page)
                    .map_err(ctx.error())?,
                limit: api::page_limit(limit).map_err(ctx.error())?,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        let is_mine = ctx
            .try_current_session()
            .await?
            .is_some_and(|s| s.user_id == id);

        Ok(api::user::Profile {
            user: output.user.into(),
            listings: output.listings.into(),
            bookings: is_mine.then(|| output.bookings.into()),
        })
    }

    /// Fetches the page of `Listing`s, optionally narrowed down to the ones
    /// whose address matches the provided location term.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - a page or limit argument is not
    ///                                    positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listings",
            limit = %limit,
            location = ?location,
            otel.name = Self::SPAN_NAME,
            page = %page,
        ),
    )]
    pub async fn listings(
        location: Option<String>,
        limit: i32,
        page: i32,
        ctx: &Context,
    ) -> Result<api::listing::list::Connection, Error> {
        let selector = read::listing::list::Selector {
            page: api::page_number(page).map_err(ctx.error())?,
            limit: api::page_limit(limit).map_err(ctx.error())?,
            filter: read::listing::list::Filter {
                host: None,
                location,
            },
        };

        ctx.service()
            .execute(query::listings::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::user_page::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}

define_error! {
    enum UserError {
        #[code = "NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the provided ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the provided ID does not exist"]
        NotExists,
    }
}
