//! [`StripeConnect`] finishing a payment processor OAuth redirect.

use std::mem;

use tracing as log;

use crate::{
    effect::{ConnectRequest, Effect, Notification, Request, RequestError},
    route::Route,
    session::{self, Session},
};

/// Guard consuming itself on first use.
///
/// The OAuth authorization code it protects is single-use on the processor
/// side, so the exchange request must fire at most once no matter how many
/// times the redirect page is re-mounted.
#[expect(
    missing_copy_implementations,
    reason = "copying would fork the guard"
)]
#[derive(Debug, Default)]
pub struct OneShot(bool);

impl OneShot {
    /// Consumes this [`OneShot`].
    ///
    /// Returns `true` on the first call only.
    pub fn consume(&mut self) -> bool {
        !mem::replace(&mut self.0, true)
    }
}

/// Component handling the `/stripe` OAuth redirect.
#[derive(Debug, Default)]
pub struct StripeConnect {
    guard: OneShot,
    state: State,
}

/// Lifecycle of the authorization code exchange.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum State {
    /// Nothing has happened yet.
    #[default]
    Idle,

    /// The exchange request is in flight.
    Pending,

    /// The wallet has been linked.
    Connected,

    /// The exchange has failed.
    Failed,
}

impl StripeConnect {
    /// Mounts this component against the current [`Route`].
    ///
    /// A redirect carrying an authorization code fires the exchange request
    /// exactly once across any number of re-mounts. A redirect without a
    /// code replaces the history entry with the login page and never issues
    /// a request.
    #[must_use]
    pub fn mount(&mut self, route: &Route) -> Vec<Effect> {
        let Route::Stripe { code } = route else {
            return Vec::new();
        };

        match code {
            Some(code) => {
                if !self.guard.consume() {
                    return Vec::new();
                }
                self.state = State::Pending;
                vec![Effect::Request(Request::ConnectWallet(
                    ConnectRequest { code: code.clone() },
                ))]
            }
            None => {
                log::debug!("no authorization code in the redirect");
                vec![Effect::ReplaceNavigate(Route::Login)]
            }
        }
    }

    /// Applies the outcome of the exchange request.
    ///
    /// Success updates the shared session wallet flag, notifies, and
    /// navigates to the viewer's own page. Failure navigates there with an
    /// error flag for the page to surface.
    #[must_use]
    pub fn finished(
        &mut self,
        outcome: Result<(), RequestError>,
        session: &Session,
    ) -> Vec<Effect> {
        let Some(id) = session.viewer().id.clone() else {
            self.state = State::Failed;
            return vec![Effect::ReplaceNavigate(Route::Login)];
        };

        match outcome {
            Ok(()) => {
                self.state = State::Connected;
                vec![
                    Effect::Session(session::Update::WalletConnected(true)),
                    Effect::Notify(Notification::Success(
                        "You've successfully connected your Stripe account!"
                            .to_owned(),
                    )),
                    Effect::Navigate(Route::User {
                        id,
                        stripe_error: false,
                    }),
                ]
            }
            Err(e) => {
                log::debug!("wallet connect failed: {e}");
                self.state = State::Failed;
                vec![Effect::Navigate(Route::User {
                    id,
                    stripe_error: true,
                })]
            }
        }
    }

    /// Indicates whether a waiting indicator should be rendered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == State::Pending
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        effect::{Effect, Notification, Request, RequestError},
        route::Route,
        session::{Session, Update, Viewer},
    };

    use super::StripeConnect;

    fn session() -> Session {
        Session::new(Viewer {
            id: Some("u1".to_owned()),
            avatar: None,
            has_wallet: false,
            did_request: true,
        })
    }

    fn redirect() -> Route {
        Route::Stripe {
            code: Some("ac_123".to_owned()),
        }
    }

    #[test]
    fn exchange_fires_at_most_once_across_remounts() {
        let mut connect = StripeConnect::default();

        let first = connect.mount(&redirect());
        assert_eq!(first.len(), 1);
        assert!(matches!(
            &first[0],
            Effect::Request(Request::ConnectWallet(r)) if r.code == "ac_123",
        ));
        assert!(connect.is_pending());

        assert!(connect.mount(&redirect()).is_empty());
        assert!(connect.mount(&redirect()).is_empty());
    }

    #[test]
    fn missing_code_replaces_history_with_login() {
        let mut connect = StripeConnect::default();

        let effects = connect.mount(&Route::Stripe { code: None });

        assert_eq!(effects, vec![Effect::ReplaceNavigate(Route::Login)]);
        assert!(!connect.is_pending());
    }

    #[test]
    fn success_updates_session_then_notifies_then_navigates() {
        let mut connect = StripeConnect::default();
        drop(connect.mount(&redirect()));

        let effects = connect.finished(Ok(()), &session());

        assert_eq!(effects.len(), 3);
        assert_eq!(
            effects[0],
            Effect::Session(Update::WalletConnected(true)),
        );
        assert!(matches!(
            &effects[1],
            Effect::Notify(Notification::Success(_)),
        ));
        assert_eq!(
            effects[2],
            Effect::Navigate(Route::User {
                id: "u1".to_owned(),
                stripe_error: false,
            }),
        );
        assert!(!connect.is_pending());
    }

    #[test]
    fn failure_lands_on_the_user_page_with_an_error_flag() {
        let mut connect = StripeConnect::default();
        drop(connect.mount(&redirect()));

        let effects = connect.finished(
            Err(RequestError {
                message: "boom".to_owned(),
            }),
            &session(),
        );

        assert_eq!(
            effects,
            vec![Effect::Navigate(Route::User {
                id: "u1".to_owned(),
                stripe_error: true,
            })],
        );
    }
}
