//! [`Command`] for hosting a new [`Listing`].

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for hosting a new [`Listing`].
#[derive(Clone, Debug)]
pub struct HostListing {
    /// ID of the [`User`] hosting the new [`Listing`].
    pub host: user::Id,

    /// [`listing::Kind`] of the new [`Listing`].
    pub kind: listing::Kind,

    /// [`listing::Title`] of the new [`Listing`].
    pub title: listing::Title,

    /// [`listing::Description`] of the new [`Listing`].
    pub description: listing::Description,

    /// Single concatenated [`listing::Address`] of the new [`Listing`].
    pub address: listing::Address,

    /// [`listing::Image`] of the new [`Listing`].
    pub image: listing::Image,

    /// Price of the new [`Listing`] per day, in minor currency units.
    pub price: Money,

    /// Maximum number of guests the new [`Listing`] accommodates.
    pub num_guests: listing::NumGuests,
}

impl<Db, Pay> Command<HostListing> for Service<Db, Pay>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: HostListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let HostListing {
            host,
            kind,
            title,
            description,
            address,
            image,
            price,
            num_guests,
        } = cmd;

        let host_user = self
            .database()
            .execute(Select(By::new(host)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HostNotExists(host))
            .map_err(tracerr::wrap!())?;
        if !host_user.has_wallet() {
            return Err(tracerr::new!(E::WalletRequired));
        }

        let listing = Listing {
            id: listing::Id::new(),
            host,
            kind,
            title,
            description,
            address,
            image,
            price,
            num_guests,
        };

        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(listing)
    }
}

/// Error of [`HostListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] hosting the [`Listing`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    HostNotExists(#[error(not(source))] user::Id),

    /// [`User`] hosting the [`Listing`] has no linked wallet.
    #[display("`User` has not linked a payment processor account")]
    WalletRequired,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{money::Currency, Handler as _, Money};

    use crate::{
        domain::{listing, user, User},
        infra::{payment, InMemory},
        Config, Service,
    };

    use super::{ExecutionError, HostListing};

    fn service() -> Service<InMemory, payment::Stripe> {
        Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                session_ttl: Duration::from_secs(30 * 60),
            },
            InMemory::default(),
            payment::Stripe::new(payment::Config::default()),
        )
    }

    fn host(connected: bool) -> User {
        let mut user = User::new(
            user::Name::new("Bobby Boone").unwrap(),
            user::Avatar::new("https://example.com/a.png").unwrap(),
            user::Email::new("bobby@example.com").unwrap(),
        );
        if connected {
            user.wallet_id = Some("acct_123".into());
        }
        user
    }

    fn command(host: user::Id) -> HostListing {
        HostListing {
            host,
            kind: listing::Kind::Apartment,
            title: listing::Title::new("Bel-Air mansion").unwrap(),
            description: listing::Description::new("Iconic home.").unwrap(),
            address: listing::Address::from_parts(
                "251 North Bristol Avenue",
                "Los Angeles",
                "California",
                "90210",
            ),
            image: listing::Image::new("data:image/png;base64,iVBORw0KGgo=")
                .unwrap(),
            price: Money {
                minor: 12000,
                currency: Currency::Usd,
            },
            num_guests: listing::NumGuests::new(4).unwrap(),
        }
    }

    #[tokio::test]
    async fn inserts_listing_for_connected_host() {
        let svc = service();
        let user = host(true);
        let user_id = user.id;
        svc.database()
            .execute(common::operations::Insert(user))
            .await
            .unwrap();

        let listing = svc.execute(command(user_id)).await.unwrap();
        assert_eq!(listing.host, user_id);
        assert_eq!(listing.price.minor, 12000);
    }

    #[tokio::test]
    async fn refuses_host_without_wallet() {
        let svc = service();
        let user = host(false);
        let user_id = user.id;
        svc.database()
            .execute(common::operations::Insert(user))
            .await
            .unwrap();

        let err = svc.execute(command(user_id)).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::WalletRequired));
    }

    #[tokio::test]
    async fn refuses_unknown_host() {
        let svc = service();
        let err = svc.execute(command(user::Id::new())).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HostNotExists(_)));
    }
}
