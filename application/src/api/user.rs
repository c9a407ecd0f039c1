//! [`User`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`User`] of the marketplace.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`domain::User`] representing this [`User`].
    user: OnceCell<domain::User>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            user: OnceCell::new_with(Some(user)),
        }
    }
}

impl User {
    /// Creates a new [`User`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`User`] with the provided ID exists,
    /// otherwise accessing this [`User`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            user: OnceCell::new(),
        }
    }

    /// Returns the [`domain::User`] representing this [`User`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::User`] doesn't exist.
    async fn user(&self, ctx: &Context) -> Result<&domain::User, Error> {
        let id = self.id.into();
        self.user
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|u| {
                        future::ready(u.ok_or_else(|| {
                            api::query::UserError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A `User` of the marketplace.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.user(ctx).await?.name.clone().into())
    }

    /// Avatar URL of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.avatar",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn avatar(&self, ctx: &Context) -> Result<Avatar, Error> {
        Ok(self.user(ctx).await?.avatar.clone().into())
    }

    /// Contact email of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.contact",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn contact(&self, ctx: &Context) -> Result<Email, Error> {
        Ok(self.user(ctx).await?.contact.clone().into())
    }

    /// Indicator whether this `User` has linked a payment processor account.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.hasWallet",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn has_wallet(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.user(ctx).await?.has_wallet())
    }

    /// Lifetime hosting income of this `User`.
    ///
    /// Visible to this `User` only; everyone else receives `null`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.income",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn income(&self, ctx: &Context) -> Result<Option<Money>, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.user_id);

        Ok(if Some(self.id) == my_id {
            Some(self.user(ctx).await?.income)
        } else {
            None
        })
    }
}

/// Combined profile view of a `User`: the profile itself plus one page of
/// the listings they host and one page of the bookings they have made.
#[derive(Debug, GraphQLObject)]
#[graphql(context = Context, name = "UserProfile")]
pub struct Profile {
    /// The `User` the profile belongs to.
    pub user: User,

    /// Selected page of the `Listing`s hosted by the `User`.
    pub listings: api::listing::list::Connection,

    /// Selected page of the `Booking`s made by the `User`.
    ///
    /// Visible to the profile owner only; everyone else receives `null`.
    pub bookings: Option<api::booking::list::Connection>,
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Via::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Avatar URL of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserAvatar",
    with = scalar::Via::<domain::user::Avatar>,
)]
pub struct Avatar(domain::user::Avatar);

/// Contact email of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserEmail",
    with = scalar::Via::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);
