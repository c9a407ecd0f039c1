//! Domain definitions.

pub mod booking;
pub mod listing;
pub mod user;

pub use self::{booking::Booking, listing::Listing, user::User, user::Viewer};
