//! In-memory transaction repository.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::shared::{AccountId, BudgetId, DateRange, UserGroupId};
use crate::domain::transactions::{TransactionError, TransactionJournal, TransactionRepository};

/// In-memory implementation of `TransactionRepository`.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    journals: RwLock<Vec<TransactionJournal>>,
}

impl InMemoryTransactionRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a journal.
    pub fn add(&self, journal: TransactionJournal) {
        let mut journals = self.journals.write().unwrap_or_else(PoisonError::into_inner);
        journals.retain(|j| j.id != journal.id);
        journals.push(journal);
    }

    /// Number of stored journals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.journals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no journals are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, keep: impl Fn(&TransactionJournal) -> bool) -> Vec<TransactionJournal> {
        let journals = self.journals.read().unwrap_or_else(PoisonError::into_inner);
        let mut selected: Vec<TransactionJournal> =
            journals.iter().filter(|j| keep(j)).cloned().collect();
        selected.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        selected
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn expenses_in_range(
        &self,
        group: UserGroupId,
        range: &DateRange,
        budgets: &[BudgetId],
    ) -> Result<Vec<TransactionJournal>, TransactionError> {
        Ok(self.select(|j| {
            j.user_group_id == group && j.is_expense_in(budgets) && range.contains(j.date)
        }))
    }

    async fn journals_for_account(
        &self,
        group: UserGroupId,
        account: AccountId,
        until: DateTime<Utc>,
    ) -> Result<Vec<TransactionJournal>, TransactionError> {
        Ok(self.select(|j| j.user_group_id == group && j.touches(account) && j.date <= until))
    }

    async fn last_activity(
        &self,
        group: UserGroupId,
        account: AccountId,
    ) -> Result<Option<DateTime<Utc>>, TransactionError> {
        let journals = self.journals.read().unwrap_or_else(PoisonError::into_inner);
        Ok(journals
            .iter()
            .filter(|j| j.user_group_id == group && j.touches(account))
            .map(|j| j.date)
            .max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transactions::TransactionType;
    use crate::domain::shared::{Amount, CurrencyId, JournalId};
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn journal(id: u64, day: u32, kind: TransactionType, budget: Option<u64>) -> TransactionJournal {
        TransactionJournal {
            id: JournalId::new(id),
            user_group_id: UserGroupId::new(1),
            transaction_type: kind,
            date: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            description: String::new(),
            source_id: AccountId::new(1),
            destination_id: AccountId::new(2),
            currency_id: CurrencyId::new(1),
            amount: Amount::new(dec!(5)),
            foreign_currency_id: None,
            foreign_amount: None,
            budget_id: budget.map(BudgetId::new),
        }
    }

    fn range(from: u32, to: u32) -> DateRange {
        DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, from).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, to).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn expenses_filtered_by_budget_type_and_range() {
        let repo = InMemoryTransactionRepository::new();
        repo.add(journal(1, 5, TransactionType::Withdrawal, Some(1)));
        repo.add(journal(2, 6, TransactionType::Deposit, Some(1)));
        repo.add(journal(3, 7, TransactionType::Withdrawal, Some(2)));
        repo.add(journal(4, 25, TransactionType::Withdrawal, Some(1)));

        let found = repo
            .expenses_in_range(UserGroupId::new(1), &range(1, 10), &[BudgetId::new(1)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, JournalId::new(1));
    }

    #[tokio::test]
    async fn account_journals_up_to_instant() {
        let repo = InMemoryTransactionRepository::new();
        repo.add(journal(1, 5, TransactionType::Withdrawal, None));
        repo.add(journal(2, 20, TransactionType::Withdrawal, None));
        let until = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let found = repo
            .journals_for_account(UserGroupId::new(1), AccountId::new(2), until)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let last = repo
            .last_activity(UserGroupId::new(1), AccountId::new(1))
            .await
            .unwrap();
        assert_eq!(last, Some(Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap()));
        assert_eq!(
            repo.last_activity(UserGroupId::new(1), AccountId::new(9)).await.unwrap(),
            None
        );
    }
}
