//! Account balances from opening balance and journals.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use super::exchange_rate_converter::ExchangeRateConverter;
use crate::application::errors::ApplicationError;
use crate::domain::accounts::Account;
use crate::domain::currency::{CurrencyRepository, TransactionCurrency};
use crate::domain::shared::Amount;
use crate::domain::transactions::{TransactionJournal, TransactionRepository};

/// Computes account balances at a moment in time.
pub struct BalanceCalculator<T: TransactionRepository> {
    transactions: Arc<T>,
}

impl<T: TransactionRepository> BalanceCalculator<T> {
    /// Create a calculator reading from the given journals.
    pub fn new(transactions: Arc<T>) -> Self {
        Self { transactions }
    }

    /// Balance of an account in its own currency at `at` (inclusive).
    ///
    /// Money leaving the account counts negative and money arriving counts
    /// positive. Journals in another currency use their foreign amount when it
    /// is in the account's currency, and are converted on their booking day
    /// otherwise.
    pub async fn balance_at<C: CurrencyRepository>(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        account: &Account,
        currency: &TransactionCurrency,
        at: DateTime<Utc>,
    ) -> Result<Amount, ApplicationError> {
        let journals = self
            .transactions
            .journals_for_account(account.user_group_id, account.id, at)
            .await?;
        let mut balance = account.opening_balance;
        for journal in &journals {
            let direction = journal.direction_for(account.id);
            if direction == 0 {
                continue;
            }
            let amount = self
                .amount_in_account_currency(converter, journal, currency)
                .await?;
            balance += if direction < 0 { -amount } else { amount };
        }
        Ok(balance)
    }

    /// Balance just before `moment`, leaving out journals booked at it.
    pub async fn balance_before<C: CurrencyRepository>(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        account: &Account,
        currency: &TransactionCurrency,
        moment: DateTime<Utc>,
    ) -> Result<Amount, ApplicationError> {
        self.balance_at(converter, account, currency, moment - TimeDelta::nanoseconds(1))
            .await
    }

    async fn amount_in_account_currency<C: CurrencyRepository>(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        journal: &TransactionJournal,
        currency: &TransactionCurrency,
    ) -> Result<Amount, ApplicationError> {
        if journal.currency_id == currency.id {
            return Ok(journal.amount);
        }
        if let Some(foreign) = journal.foreign_amount_in(currency.id) {
            return Ok(foreign);
        }
        let journal_currency = converter.currency(journal.currency_id).await?;
        Ok(converter
            .convert(journal.amount, &journal_currency, currency, journal.date.date_naive())
            .await?)
    }
}
