//! [`Booking`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// A stay booked by a `User` in a `Listing`.
#[derive(Clone, Debug, From, Into)]
pub struct Booking(domain::Booking);

/// A stay booked by a `User` in a `Listing`.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Listing` this `Booking` was made in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.listing",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn listing(&self) -> api::Listing {
        #[expect(
            unsafe_code,
            reason = "`Booking` loaded from repository guarantees `Listing` \
                      existence"
        )]
        unsafe {
            api::Listing::new_unchecked(self.0.listing)
        }
    }

    /// `User` who booked the stay.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.tenant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn tenant(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`Booking` loaded from repository guarantees `User` \
                      existence"
        )]
        unsafe {
            api::User::new_unchecked(self.0.tenant)
        }
    }

    /// Check-in date of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.checkIn",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_in(&self) -> Date {
        self.0.check_in.into()
    }

    /// Check-out date of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.checkOut",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_out(&self) -> Date {
        self.0.check_out.into()
    }
}

/// Unique identifier of a `Booking`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

/// Calendar date of a `Booking` boundary, in `yyyy-mm-dd` form.
#[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "BookingDate",
    with = scalar::Via::<domain::booking::Date>,
)]
pub struct Date(domain::booking::Date);

pub mod list {
    //! Definitions related to [`Booking`] list.

    use derive_more::{From, Into};
    use juniper::graphql_object;
    use service::read;

    use crate::{Context, Error};

    use super::Booking;

    /// Single page of the `Booking` list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::booking::list::Page);

    /// Single page of the `Booking` list.
    #[graphql_object(name = "BookingsPage", context = Context)]
    impl Connection {
        /// `Booking`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Booking> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total count of `Booking`s on all pages.
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
