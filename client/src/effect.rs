//! [`Effect`]s components hand back to the embedding shell.

use common::{PageLimit, PageNumber};
use derive_more::{Display, Error, From};
use serde::Serialize;

use crate::{route::Route, session};

/// Side effect requested by a component.
///
/// Components never perform IO themselves; the shell executes these in the
/// returned order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Pushes a new [`Route`] onto the navigation history.
    Navigate(Route),

    /// Replaces the current history entry with the [`Route`].
    ReplaceNavigate(Route),

    /// Shows a transient [`Notification`].
    Notify(Notification),

    /// Applies a write to the shared [`Session`].
    ///
    /// [`Session`]: crate::Session
    Session(session::Update),

    /// Issues a network [`Request`].
    Request(Request),
}

/// Transient message shown to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    /// Success message.
    Success(String),

    /// Error message.
    Error(String),
}

/// Network request descriptor emitted by a component.
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub enum Request {
    /// Creation of a new listing.
    HostListing(HostListingRequest),

    /// Exchange of a payment processor authorization code.
    ConnectWallet(ConnectRequest),

    /// Combined user-page query.
    UserPage(UserPageRequest),
}

/// Payload of a listing-creation request.
///
/// Carries the single concatenated address and the price in minor units;
/// the discrete address parts of the draft never reach the wire.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostListingRequest {
    /// Kind of the listing.
    #[serde(rename = "type")]
    pub kind: ListingKind,

    /// Maximum number of guests.
    pub num_of_guests: u16,

    /// Title of the listing.
    pub title: String,

    /// Description of the listing.
    pub description: String,

    /// Single concatenated address.
    pub address: String,

    /// Image of the listing, as a base64 `data:` URL.
    pub image: String,

    /// Price per day, in minor currency units.
    pub price: i64,
}

/// Kind of a listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingKind {
    /// An apartment.
    Apartment,

    /// A standalone house.
    House,
}

/// Payload of a payment-connect exchange request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ConnectRequest {
    /// Authorization code to exchange.
    pub code: String,
}

/// Parameters of the combined user-page query.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageRequest {
    /// ID of the user whose page to resolve.
    pub user_id: String,

    /// 1-based page of the user's listings.
    pub listings_page: PageNumber,

    /// 1-based page of the user's bookings.
    pub bookings_page: PageNumber,

    /// Page size shared by both collections.
    pub limit: PageLimit,
}

/// Failure outcome of an executed [`Request`], as reported by the shell.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("request failed: {message}")]
pub struct RequestError {
    /// Human-readable description of the failure.
    pub message: String,
}
