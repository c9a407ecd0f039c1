//! [`Viewer`]-related definitions.

use derive_more::{AsRef, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{command, domain};

use crate::{
    api::{self, scalar},
    Context,
};

/// Session identity of the current `User`, as exposed to clients.
///
/// All identity fields are optional: an anonymous viewer carries only the
/// `didRequest` flag.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Viewer {
    /// Unique identifier of the signed-in `User`, if any.
    pub id: Option<api::user::Id>,

    /// Authentication token of the current session, if one was just
    /// established.
    pub token: Option<Token>,

    /// Avatar URL of the signed-in `User`, if any.
    pub avatar: Option<api::user::Avatar>,

    /// Indicator whether the signed-in `User` has linked a payment
    /// processor account.
    pub has_wallet: Option<bool>,

    /// Indicator that the sign-in state has actually been resolved.
    pub did_request: bool,
}

impl Viewer {
    /// Returns an anonymous [`Viewer`] carrying no identity.
    #[must_use]
    pub(crate) fn anonymous() -> Self {
        Self {
            id: None,
            token: None,
            avatar: None,
            has_wallet: None,
            did_request: true,
        }
    }
}

impl From<domain::Viewer> for Viewer {
    fn from(viewer: domain::Viewer) -> Self {
        let domain::Viewer {
            id,
            avatar,
            has_wallet,
        } = viewer;
        Self {
            id: Some(id.into()),
            token: None,
            avatar: Some(avatar.into()),
            has_wallet: Some(has_wallet),
            did_request: true,
        }
    }
}

impl From<command::create_user_session::Output> for Viewer {
    fn from(output: command::create_user_session::Output) -> Self {
        let command::create_user_session::Output {
            token,
            viewer,
            expires_at: _,
        } = output;
        Self {
            token: Some(token.into()),
            ..viewer.into()
        }
    }
}

/// Access token of a `Viewer` session.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "ViewerAuthToken",
    with = scalar::Via::<domain::user::session::Token>,
)]
pub struct Token(domain::user::session::Token);
