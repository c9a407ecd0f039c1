//! [`Query`] for the combined user-page view.

use common::{
    operations::{By, Select},
    PageLimit, PageNumber,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] resolving a [`User`] profile together with one page of their
/// [`Listing`]s and one page of their [`Booking`]s.
///
/// The two page numbers are independent: changing one never moves the
/// other.
///
/// [`Booking`]: crate::domain::Booking
/// [`Listing`]: crate::domain::Listing
#[derive(Clone, Copy, Debug)]
pub struct ById {
    /// ID of the [`User`] to resolve.
    pub user_id: user::Id,

    /// [`PageNumber`] of the [`Listing`]s page.
    ///
    /// [`Listing`]: crate::domain::Listing
    pub listings_page: PageNumber,

    /// [`PageNumber`] of the [`Booking`]s page.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub bookings_page: PageNumber,

    /// [`PageLimit`] shared by both pages.
    pub limit: PageLimit,
}

/// Output of the [`ById`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Resolved [`User`] profile.
    pub user: User,

    /// Selected page of the [`User`]'s [`Listing`]s.
    ///
    /// [`Listing`]: crate::domain::Listing
    pub listings: read::listing::list::Page,

    /// Selected page of the [`User`]'s [`Booking`]s.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub bookings: read::booking::list::Page,
}

impl<Db, Pay> Query<ById> for Service<Db, Pay>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::listing::list::Page, read::listing::list::Selector>>,
            Ok = read::listing::list::Page,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::booking::list::Page, read::booking::list::Selector>>,
            Ok = read::booking::list::Page,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ById) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ById {
            user_id,
            listings_page,
            bookings_page,
            limit,
        } = query;

        let user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let listings = self.database().execute(Select(By::new(
            read::listing::list::Selector {
                page: listings_page,
                limit,
                filter: read::listing::list::Filter {
                    host: Some(user_id),
                    location: None,
                },
            },
        )));
        let bookings = self.database().execute(Select(By::new(
            read::booking::list::Selector {
                page: bookings_page,
                limit,
                filter: read::booking::list::Filter {
                    tenant: Some(user_id),
                },
            },
        )));
        let (listings, bookings) = futures::try_join!(listings, bookings)
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            user,
            listings,
            bookings,
        })
    }
}

/// Error of [`ById`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        money::Currency, operations::Insert, Handler as _, Money, PageLimit,
        PageNumber,
    };

    use crate::{
        domain::{booking, listing, user, Booking, Listing, User},
        infra::{payment, InMemory},
        Config, Service,
    };

    use super::{ById, ExecutionError};

    async fn service_with_user(
        num_listings: usize,
        num_bookings: usize,
    ) -> (Service<InMemory, payment::Stripe>, user::Id) {
        let svc = Service::new(
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
        );

        let user = User::new(
            user::Name::new("Bobby Boone").unwrap(),
            user::Avatar::new("https://example.com/a.png").unwrap(),
            user::Email::new("bobby@example.com").unwrap(),
        );
        let user_id = user.id;
        svc.database().execute(Insert(user)).await.unwrap();

        for n in 0..num_listings {
            svc.database()
                .execute(Insert(Listing {
                    id: listing::Id::new(),
                    host: user_id,
                    kind: listing::Kind::House,
                    title: listing::Title::new(format!("House {n}"))
                        .unwrap(),
                    description: listing::Description::new("A house.")
                        .unwrap(),
                    address: listing::Address::from_parts(
                        "251 North Bristol Avenue",
                        "Los Angeles",
                        "California",
                        "90210",
                    ),
                    image: listing::Image::new(
                        "data:image/png;base64,iVBORw0KGgo=",
                    )
                    .unwrap(),
                    price: Money {
                        minor: 12000,
                        currency: Currency::Usd,
                    },
                    num_guests: listing::NumGuests::new(4).unwrap(),
                }))
                .await
                .unwrap();
        }
        for _ in 0..num_bookings {
            svc.database()
                .execute(Insert(Booking {
                    id: booking::Id::new(),
                    listing: listing::Id::new(),
                    tenant: user_id,
                    check_in: "2026-05-20".parse().unwrap(),
                    check_out: "2026-05-27".parse().unwrap(),
                }))
                .await
                .unwrap();
        }

        (svc, user_id)
    }

    #[tokio::test]
    async fn pages_are_independent() {
        let (svc, user_id) = service_with_user(6, 3).await;
        let limit = PageLimit::new(4).unwrap();

        let first = svc
            .execute(ById {
                user_id,
                listings_page: PageNumber::FIRST,
                bookings_page: PageNumber::FIRST,
                limit,
            })
            .await
            .unwrap();
        assert_eq!(first.listings.items.len(), 4);
        assert_eq!(first.listings.total_count, 6);
        assert_eq!(first.bookings.items.len(), 3);

        // Moving the listings cursor alone leaves the bookings page as-is.
        let second = svc
            .execute(ById {
                user_id,
                listings_page: PageNumber::FIRST.forward(),
                bookings_page: PageNumber::FIRST,
                limit,
            })
            .await
            .unwrap();
        assert_eq!(second.listings.items.len(), 2);
        assert_eq!(
            second.bookings.items.len(),
            first.bookings.items.len(),
        );
    }

    #[tokio::test]
    async fn unknown_user_is_an_error() {
        let (svc, _) = service_with_user(0, 0).await;
        let err = svc
            .execute(ById {
                user_id: user::Id::new(),
                listings_page: PageNumber::FIRST,
                bookings_page: PageNumber::FIRST,
                limit: PageLimit::new(4).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
