//! [`Command`] definition.

pub mod authorize_user_session;
pub mod connect_wallet;
pub mod create_user_session;
pub mod disconnect_wallet;
pub mod host_listing;
pub mod log_in;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    connect_wallet::ConnectWallet, create_user_session::CreateUserSession,
    disconnect_wallet::DisconnectWallet, host_listing::HostListing,
    log_in::LogIn,
};
