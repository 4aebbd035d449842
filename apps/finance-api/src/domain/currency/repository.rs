//! Currency Repository Trait
//!
//! Persistence abstraction for currencies and their exchange rates.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::currency::TransactionCurrency;
use super::errors::CurrencyError;
use super::exchange_rate::ExchangeRate;
use crate::domain::shared::CurrencyId;

/// Repository trait for currencies and exchange rates.
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    /// Find a currency by ID.
    async fn find_by_id(&self, id: CurrencyId) -> Result<Option<TransactionCurrency>, CurrencyError>;

    /// Find a currency by its ISO code (case-insensitive).
    async fn find_by_code(&self, code: &str) -> Result<Option<TransactionCurrency>, CurrencyError>;

    /// Most recent usable (non-zero) `from → to` rate dated on or before
    /// `date`. Zero rates are skipped, so an older rate can win.
    async fn find_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, CurrencyError>;
}
