//! Transaction journal entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::{AccountId, Amount, BudgetId, CurrencyId, JournalId, UserGroupId};

/// Kind of money movement a journal records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money leaving an asset account towards an expense account.
    Withdrawal,
    /// Money arriving in an asset account from a revenue account.
    Deposit,
    /// Money moving between two own accounts.
    Transfer,
    /// The initial balance of an account.
    OpeningBalance,
}

/// A single transaction: `amount` moves from `source_id` to `destination_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionJournal {
    /// Journal ID.
    pub id: JournalId,
    /// Owning user group.
    pub user_group_id: UserGroupId,
    /// Kind of transaction.
    pub transaction_type: TransactionType,
    /// Booking moment.
    pub date: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
    /// Account the money leaves.
    pub source_id: AccountId,
    /// Account the money arrives in.
    pub destination_id: AccountId,
    /// Currency of `amount`.
    pub currency_id: CurrencyId,
    /// Moved amount, always positive.
    pub amount: Amount,
    /// Currency of the amount as recorded in a second currency.
    pub foreign_currency_id: Option<CurrencyId>,
    /// The amount in the foreign currency, always positive.
    pub foreign_amount: Option<Amount>,
    /// Budget the transaction is filed under.
    pub budget_id: Option<BudgetId>,
}

impl TransactionJournal {
    /// Whether this is a withdrawal filed under one of `budgets`.
    #[must_use]
    pub fn is_expense_in(&self, budgets: &[BudgetId]) -> bool {
        self.transaction_type == TransactionType::Withdrawal
            && self.budget_id.is_some_and(|b| budgets.contains(&b))
    }

    /// Whether the journal touches the account on either side.
    #[must_use]
    pub fn touches(&self, account: AccountId) -> bool {
        self.source_id == account || self.destination_id == account
    }

    /// Direction factor for an account: `-1` when money leaves it, `+1` when
    /// it arrives, `0` when untouched or moved within the same account.
    #[must_use]
    pub fn direction_for(&self, account: AccountId) -> i8 {
        match (self.source_id == account, self.destination_id == account) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// The foreign amount if it is recorded in `currency`.
    #[must_use]
    pub fn foreign_amount_in(&self, currency: CurrencyId) -> Option<Amount> {
        match (self.foreign_currency_id, self.foreign_amount) {
            (Some(id), Some(amount)) if id == currency => Some(amount),
            _ => None,
        }
    }
}
