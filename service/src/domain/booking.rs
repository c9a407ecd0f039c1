//! [`Booking`] definitions.

use std::fmt;

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description};
use uuid::Uuid;

use crate::domain::{listing, user};
#[cfg(doc)]
use crate::domain::{Listing, User};

/// Stay booked by a [`User`] in a [`Listing`].
///
/// Bookings are only ever read and listed here; creating them (and all of
/// the availability and settlement logic around that) belongs to another
/// part of the system.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Listing`].
    pub listing: listing::Id,

    /// ID of the [`User`] who booked the stay.
    pub tenant: user::Id,

    /// Check-in [`Date`] of this [`Booking`].
    pub check_in: Date,

    /// Check-out [`Date`] of this [`Booking`].
    pub check_out: Date,
}

/// ID of a [`Booking`].
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

/// Calendar date of a [`Booking`] boundary, in `yyyy-mm-dd` form.
#[derive(Clone, Copy, Debug, Eq, From, Into, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Format the dates travel the wire in.
    const FORMAT: &'static [FormatItem<'static>] =
        format_description!("[year]-[month]-[day]");
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted =
            self.0.format(Self::FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for Date {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| "invalid `Date`")
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    #[test]
    fn date_round_trips_iso_form() {
        let date = "2026-05-20".parse::<Date>().unwrap();
        assert_eq!(date.to_string(), "2026-05-20");
        assert!("20-05-2026".parse::<Date>().is_err());
        assert!("2026-13-01".parse::<Date>().is_err());
    }
}
