//! [`Listing`] definitions.

use std::fmt;

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Rental listing hosted by a [`User`].
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`User`] hosting this [`Listing`].
    pub host: user::Id,

    /// [`Kind`] of this [`Listing`].
    pub kind: Kind,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// Single concatenated [`Address`] of this [`Listing`].
    pub address: Address,

    /// [`Image`] of this [`Listing`].
    pub image: Image,

    /// Price of this [`Listing`] per day, in minor currency units.
    pub price: Money,

    /// Maximum number of guests this [`Listing`] accommodates.
    pub num_guests: NumGuests,
}

define_kind! {
    #[doc = "Kind of a [`Listing`]."]
    enum Kind {
        #[doc = "An apartment."]
        Apartment = 1,

        #[doc = "A standalone house."]
        House = 2,
    }
}

/// ID of a [`Listing`].
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

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Maximum length of a [`Title`], in characters.
    pub const MAX_LEN: usize = 45;

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title
            && !title.is_empty()
            && title.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Description(String);

impl Description {
    /// Maximum length of a [`Description`], in characters.
    pub const MAX_LEN: usize = 400;

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.is_empty() && text.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Single concatenated address of a [`Listing`].
///
/// Discrete street/city/state/postal-code parts never survive past the
/// submitting client, which joins them into this one string.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Address(String);

impl Address {
    /// Separator the address parts are joined with.
    const SEPARATOR: &'static str = ", ";

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Creates a new [`Address`] by joining the provided parts.
    #[must_use]
    pub fn from_parts(
        street: &str,
        city: &str,
        state: &str,
        postal_code: &str,
    ) -> Self {
        Self(
            [street, city, state, postal_code].join(Self::SEPARATOR),
        )
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        !address.trim().is_empty() && address.len() <= 1024
    }

    /// Indicates whether this [`Address`] contains the provided `term`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, term: impl AsRef<str>) -> bool {
        self.0
            .to_ascii_lowercase()
            .contains(&term.as_ref().to_ascii_lowercase())
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Base64-encoded image of a [`Listing`], as a `data:` URL.
#[derive(AsRef, Clone, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Image(String);

impl Image {
    /// Maximum length of an [`Image`] value, in bytes.
    ///
    /// Base64 inflates its input by 4/3, so this bounds the encoded form of
    /// a 1 MiB source file with the `data:` preamble.
    pub const MAX_LEN: usize = (1024 * 1024 / 3) * 4 + 64;

    /// Creates a new [`Image`] if the given `data_url` is valid.
    #[must_use]
    pub fn new(data_url: impl Into<String>) -> Option<Self> {
        let data_url = data_url.into();
        Self::check(&data_url).then_some(Self(data_url))
    }

    /// Checks whether the given `data_url` is a valid [`Image`].
    fn check(data_url: impl AsRef<str>) -> bool {
        let data_url = data_url.as_ref();
        (data_url.starts_with("data:image/jpeg;base64,")
            || data_url.starts_with("data:image/png;base64,"))
            && data_url.len() <= Self::MAX_LEN
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload is megabytes of base64, not worth logging.
        f.debug_tuple("Image").field(&format!("{} B", self.0.len())).finish()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Image {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Image`")
    }
}

/// Maximum number of guests a [`Listing`] accommodates.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
pub struct NumGuests(u16);

impl NumGuests {
    /// Creates a new [`NumGuests`] if the given `num` is positive.
    #[must_use]
    pub fn new(num: u16) -> Option<Self> {
        (num > 0).then_some(Self(num))
    }
}

impl TryFrom<i32> for NumGuests {
    type Error = &'static str;

    fn try_from(num: i32) -> Result<Self, Self::Error> {
        u16::try_from(num)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `NumGuests`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Address, Description, Image, NumGuests, Title};

    #[test]
    fn title_capped_at_45_chars() {
        assert!(Title::new("The iconic and luxurious Bel-Air mansion")
            .is_some());
        assert!(Title::new("x".repeat(45)).is_some());
        assert!(Title::new("x".repeat(46)).is_none());
        assert!(Title::new("").is_none());
    }

    #[test]
    fn description_capped_at_400_chars() {
        assert!(Description::new("x".repeat(400)).is_some());
        assert!(Description::new("x".repeat(401)).is_none());
        assert!(Description::new("").is_none());
    }

    #[test]
    fn address_joins_parts_comma_separated() {
        let address = Address::from_parts(
            "251 North Bristol Avenue",
            "Los Angeles",
            "California",
            "90210",
        );
        assert_eq!(
            AsRef::<str>::as_ref(&address),
            "251 North Bristol Avenue, Los Angeles, California, 90210",
        );
    }

    #[test]
    fn address_search_ignores_case() {
        let address = Address::from_parts(
            "251 North Bristol Avenue",
            "Los Angeles",
            "California",
            "90210",
        );
        assert!(address.contains("los angeles"));
        assert!(!address.contains("san fransisco"));
    }

    #[test]
    fn image_must_be_jpeg_or_png_data_url() {
        assert!(Image::new("data:image/png;base64,iVBORw0KGgo=").is_some());
        assert!(Image::new("data:image/jpeg;base64,/9j/4AAQ").is_some());
        assert!(Image::new("data:image/gif;base64,R0lGOD").is_none());
        assert!(Image::new("iVBORw0KGgo=").is_none());
    }

    #[test]
    fn num_guests_is_positive() {
        assert!(NumGuests::new(0).is_none());
        assert!(NumGuests::new(4).is_some());
        assert!(NumGuests::try_from(-1).is_err());
    }
}
