//! [`User`] definitions.

pub mod session;

use std::sync::LazyLock;

use common::{money::Currency, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::session::Session;

/// Platform user.
#[derive(Clone, Debug, From)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Avatar`] of this [`User`].
    pub avatar: Avatar,

    /// Contact [`Email`] of this [`User`].
    pub contact: Email,

    /// [`WalletId`] of the payment processor account this [`User`] has
    /// linked, if any.
    pub wallet_id: Option<WalletId>,

    /// Lifetime income this [`User`] has earned from hosting.
    pub income: Money,
}

impl User {
    /// Creates a new [`User`] with no linked wallet and zero income.
    #[must_use]
    pub fn new(name: Name, avatar: Avatar, contact: Email) -> Self {
        Self {
            id: Id::new(),
            name,
            avatar,
            contact,
            wallet_id: None,
            income: Money {
                minor: 0,
                currency: Currency::Usd,
            },
        }
    }

    /// Indicates whether this [`User`] has linked a payment processor
    /// account.
    #[must_use]
    pub fn has_wallet(&self) -> bool {
        self.wallet_id.is_some()
    }

    /// Returns the [`Viewer`] projection of this [`User`].
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer {
            id: self.id,
            avatar: self.avatar.clone(),
            has_wallet: self.has_wallet(),
        }
    }
}

/// Session identity projection of a [`User`].
///
/// This is the only shape of a [`User`] ever handed out to an
/// unauthenticated boundary, so it carries no wallet or income details
/// beyond the linked-or-not flag.
#[derive(Clone, Debug)]
pub struct Viewer {
    /// ID of the [`User`].
    pub id: Id,

    /// [`Avatar`] of the [`User`].
    pub avatar: Avatar,

    /// Indicator whether the [`User`] has linked a payment processor
    /// account.
    pub has_wallet: bool,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Avatar URL of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Avatar(String);

impl Avatar {
    /// Creates a new [`Avatar`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`Avatar`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Avatar`].
    fn check(url: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Avatar`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^https?://\S{1,2048}$").expect("valid regex")
        });

        REGEX.is_match(url.as_ref())
    }
}

impl FromStr for Avatar {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Avatar`")
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// ID of the payment processor account linked by a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct WalletId(String);

#[cfg(test)]
mod spec {
    use super::{Avatar, Email, Name};

    #[test]
    fn name_requires_trimmed_non_empty() {
        assert!(Name::new("Bobby Boone").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
    }

    #[test]
    fn avatar_requires_http_url() {
        assert!(Avatar::new("https://example.com/a.png").is_some());
        assert!(Avatar::new("ftp://example.com/a.png").is_none());
        assert!(Avatar::new("not a url").is_none());
    }

    #[test]
    fn email_requires_address_shape() {
        assert!(Email::new("bobby@example.com").is_some());
        assert!(Email::new("bobby@example").is_none());
        assert!(Email::new("example.com").is_none());
    }
}
