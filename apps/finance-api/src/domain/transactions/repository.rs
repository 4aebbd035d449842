//! Transaction Repository Trait
//!
//! Query abstraction over transaction journals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::TransactionError;
use super::journal::TransactionJournal;
use crate::domain::shared::{AccountId, BudgetId, DateRange, UserGroupId};

/// Repository trait for transaction journals.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Withdrawals of a user group inside `range` filed under one of `budgets`.
    async fn expenses_in_range(
        &self,
        group: UserGroupId,
        range: &DateRange,
        budgets: &[BudgetId],
    ) -> Result<Vec<TransactionJournal>, TransactionError>;

    /// Journals touching an account, booked at or before `until`.
    async fn journals_for_account(
        &self,
        group: UserGroupId,
        account: AccountId,
        until: DateTime<Utc>,
    ) -> Result<Vec<TransactionJournal>, TransactionError>;

    /// Booking moment of the most recent journal touching an account.
    async fn last_activity(
        &self,
        group: UserGroupId,
        account: AccountId,
    ) -> Result<Option<DateTime<Utc>>, TransactionError>;
}
