//! [`Session`] context shared across components.

/// Client-side identity of the currently signed-in user, if any.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Viewer {
    /// ID of the signed-in user.
    pub id: Option<String>,

    /// Avatar URL of the signed-in user.
    pub avatar: Option<String>,

    /// Indicator whether the signed-in user has linked a payment
    /// processor account.
    pub has_wallet: bool,

    /// Indicator that the sign-in state has actually been resolved.
    pub did_request: bool,
}

/// Session context passed to components by reference.
///
/// Components only ever read it; the single writer is the shell applying
/// [`Update`] effects, so no component can race another on the viewer
/// state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Current [`Viewer`].
    viewer: Viewer,
}

impl Session {
    /// Creates a new [`Session`] with the provided [`Viewer`].
    #[must_use]
    pub fn new(viewer: Viewer) -> Self {
        Self { viewer }
    }

    /// Returns the current [`Viewer`].
    #[must_use]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Applies the provided [`Update`] to this [`Session`].
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Viewer(viewer) => self.viewer = viewer,
            Update::WalletConnected(connected) => {
                self.viewer.has_wallet = connected;
            }
            Update::Clear => {
                self.viewer = Viewer {
                    did_request: true,
                    ..Viewer::default()
                };
            }
        }
    }
}

/// Write to the [`Session`], emitted by components as an effect and applied
/// by the shell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Update {
    /// Replaces the whole [`Viewer`].
    Viewer(Viewer),

    /// Sets the wallet-connected flag of the current [`Viewer`].
    WalletConnected(bool),

    /// Drops the signed-in identity.
    Clear,
}

#[cfg(test)]
mod spec {
    use super::{Session, Update, Viewer};

    fn signed_in() -> Session {
        Session::new(Viewer {
            id: Some("u1".to_owned()),
            avatar: None,
            has_wallet: false,
            did_request: true,
        })
    }

    #[test]
    fn wallet_update_touches_only_the_flag() {
        let mut session = signed_in();
        session.apply(Update::WalletConnected(true));

        assert!(session.viewer().has_wallet);
        assert_eq!(session.viewer().id.as_deref(), Some("u1"));
    }

    #[test]
    fn clear_drops_identity_but_stays_resolved() {
        let mut session = signed_in();
        session.apply(Update::Clear);

        assert_eq!(session.viewer().id, None);
        assert!(session.viewer().did_request);
    }
}
