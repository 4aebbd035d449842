//! In-memory currency and exchange-rate repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::currency::{CurrencyError, CurrencyRepository, ExchangeRate, TransactionCurrency};
use crate::domain::shared::CurrencyId;

/// In-memory implementation of `CurrencyRepository`.
#[derive(Debug, Default)]
pub struct InMemoryCurrencyRepository {
    currencies: RwLock<HashMap<CurrencyId, TransactionCurrency>>,
    rates: RwLock<Vec<ExchangeRate>>,
}

impl InMemoryCurrencyRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a currency.
    pub fn add_currency(&self, currency: TransactionCurrency) {
        let mut currencies = self.currencies.write().unwrap_or_else(PoisonError::into_inner);
        currencies.insert(currency.id, currency);
    }

    /// Add an exchange rate, replacing one for the same pair and day.
    pub fn add_rate(&self, rate: ExchangeRate) {
        let mut rates = self.rates.write().unwrap_or_else(PoisonError::into_inner);
        rates.retain(|r| !(r.from == rate.from && r.to == rate.to && r.date == rate.date));
        rates.push(rate);
    }
}

#[async_trait]
impl CurrencyRepository for InMemoryCurrencyRepository {
    async fn find_by_id(&self, id: CurrencyId) -> Result<Option<TransactionCurrency>, CurrencyError> {
        let currencies = self.currencies.read().unwrap_or_else(PoisonError::into_inner);
        Ok(currencies.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<TransactionCurrency>, CurrencyError> {
        let currencies = self.currencies.read().unwrap_or_else(PoisonError::into_inner);
        let code = code.trim();
        Ok(currencies
            .values()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn find_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, CurrencyError> {
        let rates = self.rates.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rates
            .iter()
            .filter(|r| r.from == from && r.to == to && r.date <= date)
            .filter(|r| r.is_usable())
            .max_by_key(|r| r.date)
            .cloned())
    }
}
