//! Whole-unit price representation.
//!
//! Amounts are integers in the currency's standard unit; there is no
//! fractional or rounding handling. Prices display as the three-letter
//! currency code followed by the amount, e.g. `BDT 2500`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in whole currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(0, currency_code)
    }

    /// The price of `quantity` units at this price, saturating at the
    /// bounds of `i64`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(i64::from(quantity)),
            self.currency_code,
        )
    }

    /// Sum of two amounts in this currency, saturating at the bounds of `i64`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(self.amount.saturating_add(other.amount), self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency_code.code(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BDT,
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// The three-letter code shown in front of amounts.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BDT => "BDT",
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}
