//! Stored exchange rates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::CurrencyId;

/// A point-in-time exchange rate: one unit of `from` equals `rate` units of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency.
    pub from: CurrencyId,
    /// Target currency.
    pub to: CurrencyId,
    /// Day the rate applies from.
    pub date: NaiveDate,
    /// Conversion factor.
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Whether the rate can be used for conversion. Zero rates are placeholders.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.rate.is_zero()
    }

    /// The factor for the opposite direction, if the rate is usable.
    #[must_use]
    pub fn inverse(&self) -> Option<Decimal> {
        if self.is_usable() {
            Decimal::ONE.checked_div(self.rate)
        } else {
            None
        }
    }
}
