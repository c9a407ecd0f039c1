//! In-memory [`Database`] implementations.
//!
//! Real persistence lives behind another service; this store backs the
//! application binary and the tests with the same operations interface.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use common::{
    operations::{By, Insert, Select, Update},
    Page,
};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Booking, Listing, User},
    infra::{database, Database},
    read,
};

/// In-memory [`Database`].
#[derive(Clone, Debug, Default)]
pub struct InMemory(Arc<RwLock<State>>);

/// State of an [`InMemory`] database.
#[derive(Debug, Default)]
struct State {
    /// All stored [`User`]s, by their ID.
    users: HashMap<user::Id, User>,

    /// All stored [`Listing`]s, in insertion order.
    listings: Vec<Listing>,

    /// All stored [`Booking`]s, in insertion order.
    bookings: Vec<Booking>,
}

impl InMemory {
    /// Acquires a read lock on the [`State`].
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires a write lock on the [`State`].
    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Database<Insert<User>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.write().users.insert(user.id, user));
        Ok(())
    }
}

impl Database<Update<User>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.write();
        if !state.users.contains_key(&user.id) {
            return Err(tracerr::new!(database::Error::from(
                Error::UserNotExists(user.id)
            )));
        }
        drop(state.users.insert(user.id, user));
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for InMemory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read().users.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Listing>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write().listings.push(listing);
        Ok(())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read().listings.iter().find(|l| l.id == id).cloned())
    }
}

impl
    Database<
        Select<By<read::listing::list::Page, read::listing::list::Selector>>,
    > for InMemory
{
    type Ok = read::listing::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::listing::list::Page, read::listing::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let read::listing::list::Filter { host, location } = &selector.filter;

        let matching = self
            .read()
            .listings
            .iter()
            .filter(|l| host.as_ref().is_none_or(|h| l.host == *h))
            .filter(|l| {
                location.as_ref().is_none_or(|term| l.address.contains(term))
            })
            .cloned()
            .collect::<Vec<_>>();

        Ok(Page::cut(matching, selector.page, selector.limit))
    }
}

impl Database<Insert<Booking>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write().bookings.push(booking);
        Ok(())
    }
}

impl
    Database<
        Select<By<read::booking::list::Page, read::booking::list::Selector>>,
    > for InMemory
{
    type Ok = read::booking::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::Page, read::booking::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let read::booking::list::Filter { tenant } = selector.filter;

        let matching = self
            .read()
            .bookings
            .iter()
            .filter(|b| tenant.is_none_or(|t| b.tenant == t))
            .cloned()
            .collect::<Vec<_>>();

        Ok(Page::cut(matching, selector.page, selector.limit))
    }
}

/// [`InMemory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`User`] being updated does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
