//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`], stored in its minor units (cents).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct Money {
    /// Amount of this [`Money`] in minor units of its [`Currency`].
    pub minor: i64,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Number of minor units in one major unit.
    const MINOR_PER_MAJOR: i64 = 100;

    /// Creates a new [`Money`] from the provided amount of major units.
    ///
    /// Returns [`None`] if the `amount` is negative, carries a remainder
    /// smaller than one minor unit, or overflows.
    #[must_use]
    pub fn from_major(amount: Decimal, currency: Currency) -> Option<Self> {
        if amount.is_sign_negative() {
            return None;
        }
        let minor =
            amount.checked_mul(Decimal::from(Self::MINOR_PER_MAJOR))?;
        minor
            .is_integer()
            .then(|| minor.to_i64())
            .flatten()
            .map(|minor| Self { minor, currency })
    }

    /// Returns the amount of this [`Money`] in major units.
    #[must_use]
    pub fn major(&self) -> Decimal {
        Decimal::new(self.minor, 2).normalize()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { minor: _, currency } = self;
        let major = self.major();
        if major.is_integer() {
            write!(f, "{}{currency}", major.to_i128().expect("integer"))
        } else {
            write!(f, "{major}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Self::from_major(amount, currency).ok_or("not a minor units amount")
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_major_multiplies_into_minor_units() {
        assert_eq!(
            Money::from_major(decimal("120"), Currency::Usd).unwrap(),
            Money {
                minor: 12000,
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_major(decimal("123.45"), Currency::Usd).unwrap(),
            Money {
                minor: 12345,
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_major(decimal("0"), Currency::Usd).unwrap(),
            Money {
                minor: 0,
                currency: Currency::Usd,
            },
        );
    }

    #[test]
    fn from_major_rejects_invalid_amounts() {
        assert!(Money::from_major(decimal("-1"), Currency::Usd).is_none());
        assert!(Money::from_major(decimal("0.005"), Currency::Usd).is_none());
        assert!(
            Money::from_major(decimal("123.456"), Currency::Usd).is_none()
        );
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                minor: 12345,
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("123USD").unwrap(),
            Money {
                minor: 12300,
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.456USD").is_err());
        assert!(Money::from_str("-1USD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                minor: 12345,
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );
        assert_eq!(
            Money {
                minor: 12000,
                currency: Currency::Usd,
            }
            .to_string(),
            "120USD",
        );
        assert_eq!(
            Money {
                minor: 50,
                currency: Currency::Usd,
            }
            .to_string(),
            "0.5USD",
        );
    }
}
