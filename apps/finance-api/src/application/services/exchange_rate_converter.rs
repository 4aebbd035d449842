//! Currency conversion with a per-request rate cache.
//!
//! Lookup order for `from → to` on a day:
//!
//! 1. identical currencies convert at `1`;
//! 2. the most recent stored `from → to` rate on or before the day;
//! 3. the inverse of a stored `to → from` rate;
//! 4. a bridge through EUR: `rate(from → EUR) / rate(to → EUR)`, where each
//!    leg is a stored or inverse rate, or else the configured fallback rate.
//!
//! Zero rates are treated as missing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::currency::{
    BRIDGE_CURRENCY_CODE, CurrencyError, CurrencyRepository, ExchangeRateError,
    TransactionCurrency,
};
use crate::domain::shared::{Amount, CurrencyId};
use crate::observability::record_rate_lookup;

/// Fallback rates to EUR, keyed by ISO code: one unit of the currency equals
/// the given number of euros.
pub type FallbackRates = HashMap<String, Decimal>;

/// Native currency and fallback rates shared by every converter.
#[derive(Debug, Clone)]
pub struct CurrencySettings {
    /// ISO code of the currency figures are normalized to.
    pub native_currency_code: String,
    /// Rates to EUR used when no stored rate exists.
    pub fallback_rates: Arc<FallbackRates>,
}

impl CurrencySettings {
    /// Settings with the given native currency and no fallback rates.
    #[must_use]
    pub fn new(native_currency_code: impl Into<String>) -> Self {
        Self {
            native_currency_code: native_currency_code.into(),
            fallback_rates: Arc::new(FallbackRates::new()),
        }
    }

    /// Build a fresh converter for one request.
    pub fn converter<C: CurrencyRepository>(&self, currencies: Arc<C>) -> ExchangeRateConverter<C> {
        ExchangeRateConverter::new(currencies, Arc::clone(&self.fallback_rates))
    }
}

/// Converts amounts between currencies.
///
/// Build one per request. Rates and currencies are cached for its lifetime.
pub struct ExchangeRateConverter<C: CurrencyRepository> {
    currencies: Arc<C>,
    fallback_rates: Arc<FallbackRates>,
    rate_cache: HashMap<(CurrencyId, CurrencyId, NaiveDate), Decimal>,
    currency_cache: HashMap<CurrencyId, TransactionCurrency>,
    bridge: Option<Option<TransactionCurrency>>,
}

impl<C: CurrencyRepository> ExchangeRateConverter<C> {
    /// Create a converter with an empty cache.
    pub fn new(currencies: Arc<C>, fallback_rates: Arc<FallbackRates>) -> Self {
        Self {
            currencies,
            fallback_rates,
            rate_cache: HashMap::new(),
            currency_cache: HashMap::new(),
            bridge: None,
        }
    }

    /// Look up a currency by ID, caching the result.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::NotFound`] if the currency does not exist.
    pub async fn currency(&mut self, id: CurrencyId) -> Result<TransactionCurrency, CurrencyError> {
        if let Some(currency) = self.currency_cache.get(&id) {
            return Ok(currency.clone());
        }
        let currency = self
            .currencies
            .find_by_id(id)
            .await?
            .ok_or_else(|| CurrencyError::NotFound(id.to_string()))?;
        self.currency_cache.insert(id, currency.clone());
        Ok(currency)
    }

    /// Look up a currency by ISO code.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::NotFound`] if no currency has that code.
    pub async fn currency_by_code(&mut self, code: &str) -> Result<TransactionCurrency, CurrencyError> {
        let currency = self
            .currencies
            .find_by_code(code)
            .await?
            .ok_or_else(|| CurrencyError::NotFound(code.to_string()))?;
        self.currency_cache.insert(currency.id, currency.clone());
        Ok(currency)
    }

    /// The configured native currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::NotFound`] if no currency has the configured code.
    pub async fn native_currency(
        &mut self,
        settings: &CurrencySettings,
    ) -> Result<TransactionCurrency, CurrencyError> {
        self.currency_by_code(&settings.native_currency_code).await
    }

    /// Convert an amount from one currency into another on a day.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeRateError::NoRate`] if no rate can be derived.
    pub async fn convert(
        &mut self,
        amount: Amount,
        from: &TransactionCurrency,
        to: &TransactionCurrency,
        date: NaiveDate,
    ) -> Result<Amount, ExchangeRateError> {
        let rate = self.get_currency_rate(from, to, date).await?;
        Ok(amount * rate)
    }

    /// The factor that turns one unit of `from` into `to` on a day.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeRateError::NoRate`] if no rate can be derived.
    pub async fn get_currency_rate(
        &mut self,
        from: &TransactionCurrency,
        to: &TransactionCurrency,
        date: NaiveDate,
    ) -> Result<Decimal, ExchangeRateError> {
        if from.id == to.id {
            return Ok(Decimal::ONE);
        }
        let key = (from.id, to.id, date);
        if let Some(rate) = self.rate_cache.get(&key) {
            record_rate_lookup("cache");
            return Ok(*rate);
        }

        let rate = match self.stored_rate(from.id, to.id, date).await? {
            Some(rate) => {
                record_rate_lookup("stored");
                rate
            }
            None => {
                let bridged = self.bridged_rate(from, to, date).await?;
                record_rate_lookup(if bridged.is_some() { "bridge" } else { "missing" });
                bridged.ok_or_else(|| ExchangeRateError::NoRate {
                    from: from.code.clone(),
                    to: to.code.clone(),
                    date,
                })?
            }
        };

        tracing::debug!(from = %from.code, to = %to.code, %date, %rate, "Resolved exchange rate");
        self.rate_cache.insert(key, rate);
        Ok(rate)
    }

    /// A stored direct rate, or the inverse of a stored opposite rate.
    async fn stored_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CurrencyError> {
        if let Some(direct) = self.currencies.find_rate(from, to, date).await? {
            if direct.is_usable() {
                return Ok(Some(direct.rate));
            }
        }
        Ok(self
            .currencies
            .find_rate(to, from, date)
            .await?
            .and_then(|opposite| opposite.inverse()))
    }

    async fn bridged_rate(
        &mut self,
        from: &TransactionCurrency,
        to: &TransactionCurrency,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CurrencyError> {
        let Some(from_leg) = self.rate_to_bridge(from, date).await? else {
            return Ok(None);
        };
        let Some(to_leg) = self.rate_to_bridge(to, date).await? else {
            return Ok(None);
        };
        Ok(from_leg.checked_div(to_leg))
    }

    /// Rate from a currency into EUR.
    async fn rate_to_bridge(
        &mut self,
        currency: &TransactionCurrency,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CurrencyError> {
        if currency.is_bridge() {
            return Ok(Some(Decimal::ONE));
        }
        if let Some(bridge) = self.bridge_currency().await? {
            if let Some(rate) = self.stored_rate(currency.id, bridge.id, date).await? {
                return Ok(Some(rate));
            }
        }
        Ok(self
            .fallback_rates
            .get(&currency.code)
            .copied()
            .filter(|rate| !rate.is_zero()))
    }

    async fn bridge_currency(&mut self) -> Result<Option<TransactionCurrency>, CurrencyError> {
        if let Some(bridge) = &self.bridge {
            return Ok(bridge.clone());
        }
        let bridge = self.currencies.find_by_code(BRIDGE_CURRENCY_CODE).await?;
        self.bridge = Some(bridge.clone());
        Ok(bridge)
    }
}
