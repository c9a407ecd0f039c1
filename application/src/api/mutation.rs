//! GraphQL [`Mutation`]s definitions.

use common::{money::Currency, Money};
use juniper::{graphql_object, GraphQLInputObject};
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Signs a `User` in with an identity profile obtained from an external
    /// sign-in flow, creating the `User` on first sign-in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "logIn",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn log_in(
        input: LogInInput,
        ctx: &Context,
    ) -> Result<api::Viewer, Error> {
        let LogInInput {
            id,
            name,
            avatar,
            contact,
        } = input;

        let user = ctx
            .service()
            .execute(command::LogIn {
                id: id.map(Into::into),
                name: name.into(),
                avatar: avatar.into(),
                contact: contact.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.viewer.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at,
        })
        .await;

        Ok(output.into())
    }

    /// Signs the current `User` out.
    ///
    /// Sessions are stateless, so this only hands back an anonymous viewer
    /// for the client to apply.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "logOut",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn log_out() -> api::Viewer {
        api::Viewer::anonymous()
    }

    /// Creates a new `Listing` hosted by the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `WALLET_REQUIRED` - the current `User` has not linked a payment
    ///                       processor account;
    /// - `INVALID_PRICE` - the provided price is negative;
    /// - `INVALID_NUM_OF_GUESTS` - the provided guest count is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "hostListing",
            otel.name = Self::SPAN_NAME,
            title = %input.title,
        ),
    )]
    pub async fn host_listing(
        input: HostListingInput,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let my_id = ctx.current_session().await?.user_id;

        let HostListingInput {
            kind,
            title,
            description,
            address,
            image,
            price,
            num_of_guests,
        } = input;

        let price = u32::try_from(price)
            .map(|minor| Money {
                minor: minor.into(),
                currency: Currency::Usd,
            })
            .map_err(|_| Error::from(HostListingError::InvalidPrice))
            .map_err(ctx.error())?;
        let num_guests = domain::listing::NumGuests::try_from(num_of_guests)
            .map_err(|_| Error::from(HostListingError::InvalidNumOfGuests))
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::HostListing {
                host: my_id.into(),
                kind: kind.into(),
                title: title.into(),
                description: description.into(),
                address: address.into(),
                image: image.into(),
                price,
                num_guests,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Exchanges the provided payment processor authorization code and
    /// links the granted account to the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `PROCESSOR_UNAVAILABLE` - the payment processor refused or failed
    ///                             the exchange;
    /// - `NO_ACCOUNT_GRANTED` - the processor granted no connected account.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "connectStripe",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn connect_stripe(
        input: ConnectStripeInput,
        ctx: &Context,
    ) -> Result<api::Viewer, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::ConnectWallet {
                user_id: my_id.into(),
                code: input.code.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Unlinks the payment processor account of the current `User` and
    /// revokes the platform's access to it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `WALLET_NOT_CONNECTED` - the current `User` has no linked account.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "disconnectStripe",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn disconnect_stripe(
        ctx: &Context,
    ) -> Result<api::Viewer, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DisconnectWallet {
                user_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Input of the `logIn` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct LogInInput {
    /// Unique identifier of the `User` signing in, if known.
    pub id: Option<api::user::Id>,

    /// Name reported by the identity profile.
    pub name: api::user::Name,

    /// Avatar URL reported by the identity profile.
    pub avatar: api::user::Avatar,

    /// Contact email reported by the identity profile.
    pub contact: api::user::Email,
}

/// Input of the `hostListing` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct HostListingInput {
    /// Kind of the `Listing`.
    #[graphql(name = "type")]
    pub kind: api::listing::Kind,

    /// Title of the `Listing`.
    pub title: api::listing::Title,

    /// Description of the `Listing`.
    pub description: api::listing::Description,

    /// Single concatenated address of the `Listing`.
    pub address: api::listing::Address,

    /// Image of the `Listing`, as a base64 `data:` URL.
    pub image: api::listing::Image,

    /// Price of the `Listing` per day, in minor currency units.
    pub price: i32,

    /// Maximum number of guests the `Listing` accommodates.
    pub num_of_guests: i32,
}

/// Input of the `connectStripe` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct ConnectStripeInput {
    /// Authorization code produced by the processor's hosted OAuth flow.
    pub code: String,
}

impl AsError for command::log_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
        }
    }
}

impl AsError for command::host_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HostNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::WalletRequired => {
                Some(HostListingError::WalletRequired.into())
            }
        }
    }
}

impl AsError for command::connect_wallet::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Payment(_) => {
                Some(StripeError::ProcessorUnavailable.into())
            }
            Self::NoAccountGranted => {
                Some(StripeError::NoAccountGranted.into())
            }
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
        }
    }
}

impl AsError for command::disconnect_wallet::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Payment(_) => {
                Some(StripeError::ProcessorUnavailable.into())
            }
            Self::WalletNotConnected => {
                Some(StripeError::WalletNotConnected.into())
            }
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum HostListingError {
        #[code = "WALLET_REQUIRED"]
        #[status = FORBIDDEN]
        #[message = "A linked payment processor account is required to host"]
        WalletRequired,

        #[code = "INVALID_PRICE"]
        #[status = BAD_REQUEST]
        #[message = "Price must not be negative"]
        InvalidPrice,

        #[code = "INVALID_NUM_OF_GUESTS"]
        #[status = BAD_REQUEST]
        #[message = "Number of guests must be positive"]
        InvalidNumOfGuests,
    }
}

define_error! {
    enum StripeError {
        #[code = "PROCESSOR_UNAVAILABLE"]
        #[status = BAD_GATEWAY]
        #[message = "Payment processor refused or failed the request"]
        ProcessorUnavailable,

        #[code = "NO_ACCOUNT_GRANTED"]
        #[status = BAD_REQUEST]
        #[message = "Payment processor granted no connected account"]
        NoAccountGranted,

        #[code = "WALLET_NOT_CONNECTED"]
        #[status = FORBIDDEN]
        #[message = "No payment processor account is linked"]
        WalletNotConnected,
    }
}
