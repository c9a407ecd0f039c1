//! [`SearchBar`] of the application header.

use crate::{
    effect::{Effect, Notification},
    route::Route,
};

/// Free-text location search input.
///
/// The displayed text follows the navigation path, so a search landed on
/// via a link shows its term, and leaving the listings section clears the
/// input.
#[derive(Clone, Debug, Default)]
pub struct SearchBar {
    /// Currently displayed text.
    value: String,
}

impl SearchBar {
    /// Creates a new empty [`SearchBar`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently displayed text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Synchronizes the displayed text with the provided navigation path.
    ///
    /// Paths outside the listings section clear the input. A path of
    /// exactly `/listings/<term>` sets the input to `<term>` verbatim.
    /// Deeper listings paths leave the input untouched.
    pub fn sync(&mut self, path: &str) {
        if !path.contains("/listings") {
            self.value.clear();
            return;
        }

        let segments = path.split('/').collect::<Vec<_>>();
        if let ["", "listings", term] = segments.as_slice() {
            self.value = (*term).to_owned();
        }
    }

    /// Replaces the displayed text with the user's input.
    pub fn input(&mut self, text: impl Into<String>) {
        self.value = text.into();
    }

    /// Submits the current text.
    ///
    /// A non-empty trimmed term navigates to its listings path; an empty
    /// one produces a single error notification and no navigation.
    #[must_use]
    pub fn submit(&self) -> Vec<Effect> {
        let term = self.value.trim();
        if term.is_empty() {
            vec![Effect::Notify(Notification::Error(
                "Please enter a valid search!".to_owned(),
            ))]
        } else {
            vec![Effect::Navigate(Route::Listings {
                query: term.to_owned(),
            })]
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        effect::{Effect, Notification},
        route::Route,
    };

    use super::SearchBar;

    #[test]
    fn non_listings_paths_clear_the_input() {
        let mut bar = SearchBar::new();
        bar.input("toronto");

        bar.sync("/user/u1");

        assert_eq!(bar.value(), "");
    }

    #[test]
    fn listings_path_sets_the_term_verbatim() {
        let mut bar = SearchBar::new();

        bar.sync("/listings/los%20angeles");

        assert_eq!(bar.value(), "los%20angeles");
    }

    #[test]
    fn deeper_listings_paths_leave_the_input_untouched() {
        let mut bar = SearchBar::new();
        bar.input("toronto");

        bar.sync("/listings/toronto/extra");

        assert_eq!(bar.value(), "toronto");
    }

    #[test]
    fn submit_navigates_to_the_trimmed_term() {
        let mut bar = SearchBar::new();
        bar.input("  toronto  ");

        let effects = bar.submit();

        assert_eq!(
            effects,
            vec![Effect::Navigate(Route::Listings {
                query: "toronto".to_owned(),
            })],
        );
    }

    #[test]
    fn blank_submit_notifies_once_and_never_navigates() {
        let mut bar = SearchBar::new();
        bar.input("   ");

        let effects = bar.submit();

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Notify(Notification::Error(_)),
        ));
    }
}
