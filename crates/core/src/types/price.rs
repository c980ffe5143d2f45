//! Product price in Indian rupees.
//!
//! Prices travel as JSON numbers (`12.5`), so the decimal is serialized with
//! `rust_decimal`'s float adapter rather than as a string.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A rupee amount as the API reports it.
///
/// Bounds belong to the API: negative amounts are read as they are, and a
/// missing or `null` amount reads as zero, so one odd row never makes a whole
/// product list unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Format for display with the rupee sign and two decimals, e.g. `₹12.50`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("₹{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float_option::deserialize(deserializer)?;
        Ok(amount.map_or(Self::ZERO, Self))
    }
}
