//! View-layer protocol of the marketplace client.
//!
//! Every component here is a plain state machine: it performs no IO of its
//! own and instead returns [`Effect`]s describing the navigation, session
//! writes, notifications and network requests the embedding shell must
//! carry out. This keeps interaction guarantees (exactly one request per
//! submit, at-most-once payment exchanges) checkable as assertions on the
//! returned values.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod effect;
pub mod host_form;
pub mod route;
pub mod search_bar;
pub mod session;
pub mod stripe_connect;
pub mod user_page;

#[cfg(test)]
use serde_json as _;

pub use self::{
    effect::{Effect, Notification, Request, RequestError},
    host_form::HostForm,
    route::Route,
    search_bar::SearchBar,
    session::{Session, Viewer},
    stripe_connect::StripeConnect,
    user_page::UserPage,
};
