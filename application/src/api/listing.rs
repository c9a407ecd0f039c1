//! [`Listing`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A rental [`Listing`] hosted on the marketplace.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`domain::Listing`] representing this [`Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Listing`] with the provided ID exists,
    /// otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Listing`] representing this [`Listing`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Listing`] doesn't exist.
    async fn listing(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            api::query::ListingError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A rental `Listing` hosted on the marketplace.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Kind of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.type",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[graphql(name = "type")]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.listing(ctx).await?.kind.into())
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.listing(ctx).await?.title.clone().into())
    }

    /// Description of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.listing(ctx).await?.description.clone().into())
    }

    /// Single concatenated address of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.listing(ctx).await?.address.clone().into())
    }

    /// Image of this `Listing`, as a base64 `data:` URL.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.image",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn image(&self, ctx: &Context) -> Result<Image, Error> {
        Ok(self.listing(ctx).await?.image.clone().into())
    }

    /// `User` hosting this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.host",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn host(&self, ctx: &Context) -> Result<api::User, Error> {
        let host = self.listing(ctx).await?.host;
        #[expect(
            unsafe_code,
            reason = "`Listing` loaded from repository guarantees host \
                      existence"
        )]
        Ok(unsafe { api::User::new_unchecked(host) })
    }

    /// Price of this `Listing` per day.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.listing(ctx).await?.price)
    }

    /// Maximum number of guests this `Listing` accommodates.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.numOfGuests",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn num_of_guests(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(i32::from(u16::from(self.listing(ctx).await?.num_guests)))
    }
}

/// Kind of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingType")]
pub enum Kind {
    /// An apartment.
    Apartment,

    /// A standalone house.
    House,
}

impl From<domain::listing::Kind> for Kind {
    fn from(kind: domain::listing::Kind) -> Self {
        match kind {
            domain::listing::Kind::Apartment => Self::Apartment,
            domain::listing::Kind::House => Self::House,
        }
    }
}

impl From<Kind> for domain::listing::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Apartment => Self::Apartment,
            Kind::House => Self::House,
        }
    }
}

/// Unique identifier of a `Listing`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Single concatenated address of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingAddress",
    with = scalar::Via::<domain::listing::Address>,
)]
pub struct Address(domain::listing::Address);

/// Image of a `Listing`, as a base64 `data:` URL.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingImage",
    with = scalar::Via::<domain::listing::Image>,
)]
pub struct Image(domain::listing::Image);

pub mod list {
    //! Definitions related to [`Listing`] list.

    use derive_more::{From, Into};
    use juniper::graphql_object;
    use service::read;

    use crate::{Context, Error};

    use super::Listing;

    /// Single page of the `Listing` list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::listing::list::Page);

    /// Single page of the `Listing` list.
    #[graphql_object(name = "ListingsPage", context = Context)]
    impl Connection {
        /// `Listing`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Listing> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total count of `Listing`s on all pages.
        ///
        /// # Errors
        ///
        /// Errors if the count does not fit the GraphQL `Int`.
        pub fn total_count(&self) -> Result<i32, Error> {
            i32::try_from(self.0.total_count)
                .map_err(|e| Error::internal(&e))
        }
    }
}
