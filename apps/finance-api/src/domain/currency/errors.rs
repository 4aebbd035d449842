//! Currency and exchange-rate errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while looking up currencies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// No currency with the given ID or code.
    #[error("Currency not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("Currency repository failure: {0}")]
    Repository(String),
}

/// Errors raised while converting between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeRateError {
    /// Neither a direct, inverse nor bridged rate exists.
    #[error("No exchange rate between {from} and {to} on {date}")]
    NoRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
        /// Day the rate was requested for.
        date: NaiveDate,
    },

    /// Currency lookup failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}
