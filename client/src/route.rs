//! [`Route`]s the client navigates between.

use std::{convert::Infallible, fmt, str::FromStr};

/// Navigable location within the client.
///
/// Parsing is tolerant: any path outside the known set maps to
/// [`Route::NotFound`] instead of failing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    /// Landing page.
    Home,

    /// Sign-in page.
    Login,

    /// Host-a-listing form.
    Host,

    /// Payment-connect callback, optionally carrying the authorization
    /// code handed back by the processor's hosted flow.
    Stripe {
        /// Authorization code from the `code` query parameter, if any.
        code: Option<String>,
    },

    /// Listings search results for a query term.
    Listings {
        /// Searched location term, verbatim.
        query: String,
    },

    /// Detail page of a single listing.
    Listing {
        /// ID of the listing.
        id: String,
    },

    /// Profile page of a user.
    User {
        /// ID of the user.
        id: String,

        /// Indicator of a failed payment-connect attempt, from the
        /// `stripe_error` query parameter.
        stripe_error: bool,
    },

    /// Anything else.
    NotFound,
}

impl Route {
    /// Parses a [`Route`] out of the provided path with an optional query
    /// string.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let segments =
            path.split('/').skip(1).collect::<Vec<_>>();

        match segments.as_slice() {
            [""] => Self::Home,
            ["login"] => Self::Login,
            ["host"] => Self::Host,
            ["stripe"] => Self::Stripe {
                code: query_param(query, "code").map(str::to_owned),
            },
            ["listings", term] if !term.is_empty() => Self::Listings {
                query: (*term).to_owned(),
            },
            ["listing", id] if !id.is_empty() => Self::Listing {
                id: (*id).to_owned(),
            },
            ["user", id] if !id.is_empty() => Self::User {
                id: (*id).to_owned(),
                stripe_error: query_param(query, "stripe_error")
                    == Some("true"),
            },
            _ => Self::NotFound,
        }
    }
}

/// Looks up the value of the `name`d parameter in the provided query
/// string.
fn query_param<'q>(query: Option<&'q str>, name: &str) -> Option<&'q str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Login => write!(f, "/login"),
            Self::Host => write!(f, "/host"),
            Self::Stripe { code: None } => write!(f, "/stripe"),
            Self::Stripe { code: Some(code) } => {
                write!(f, "/stripe?code={code}")
            }
            Self::Listings { query } => write!(f, "/listings/{query}"),
            Self::Listing { id } => write!(f, "/listing/{id}"),
            Self::User {
                id,
                stripe_error: false,
            } => write!(f, "/user/{id}"),
            Self::User {
                id,
                stripe_error: true,
            } => write!(f, "/user/{id}?stripe_error=true"),
            Self::NotFound => write!(f, "/not-found"),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Route;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/host"), Route::Host);
        assert_eq!(
            Route::parse("/listings/los%20angeles"),
            Route::Listings {
                query: "los%20angeles".to_owned(),
            },
        );
        assert_eq!(
            Route::parse("/listing/abc"),
            Route::Listing {
                id: "abc".to_owned(),
            },
        );
    }

    #[test]
    fn extracts_stripe_code() {
        assert_eq!(Route::parse("/stripe"), Route::Stripe { code: None });
        assert_eq!(
            Route::parse("/stripe?code=ac_123"),
            Route::Stripe {
                code: Some("ac_123".to_owned()),
            },
        );
    }

    #[test]
    fn extracts_user_stripe_error_flag() {
        assert_eq!(
            Route::parse("/user/u1"),
            Route::User {
                id: "u1".to_owned(),
                stripe_error: false,
            },
        );
        assert_eq!(
            Route::parse("/user/u1?stripe_error=true"),
            Route::User {
                id: "u1".to_owned(),
                stripe_error: true,
            },
        );
    }

    #[test]
    fn unknown_tails_are_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::parse("/listings/term/extra"), Route::NotFound);
        assert_eq!(Route::parse("/user"), Route::NotFound);
    }

    #[test]
    fn formats_back_to_paths() {
        assert_eq!(
            Route::User {
                id: "u1".to_owned(),
                stripe_error: true,
            }
            .to_string(),
            "/user/u1?stripe_error=true",
        );
        assert_eq!(
            Route::Listings {
                query: "toronto".to_owned(),
            }
            .to_string(),
            "/listings/toronto",
        );
    }
}
