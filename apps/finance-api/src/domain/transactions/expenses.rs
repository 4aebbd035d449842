//! Expenses grouped per currency and budget.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::journal::TransactionJournal;
use crate::domain::shared::{Amount, BudgetId, CurrencyId, JournalId};

/// One expense as seen from a budget: amounts are negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseJournal {
    /// Source journal.
    pub journal_id: JournalId,
    /// Booking moment.
    pub date: DateTime<Utc>,
    /// Negative amount in the journal's currency.
    pub amount: Amount,
    /// Second currency the expense was recorded in, if any.
    pub foreign_currency_id: Option<CurrencyId>,
    /// Negative amount in the foreign currency, if any.
    pub foreign_amount: Option<Amount>,
}

impl From<&TransactionJournal> for ExpenseJournal {
    fn from(journal: &TransactionJournal) -> Self {
        Self {
            journal_id: journal.id,
            date: journal.date,
            amount: journal.amount.negative(),
            foreign_currency_id: journal.foreign_currency_id,
            foreign_amount: journal.foreign_amount.map(|a| a.negative()),
        }
    }
}

/// All expenses in one currency, split per budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseGroup {
    /// Currency of every journal in the group.
    pub currency_id: CurrencyId,
    /// Expenses keyed by budget, in booking order.
    pub budgets: BTreeMap<BudgetId, Vec<ExpenseJournal>>,
}

impl ExpenseGroup {
    /// Expenses filed under a budget (empty when there are none).
    #[must_use]
    pub fn journals_for(&self, budget: BudgetId) -> &[ExpenseJournal] {
        self.budgets.get(&budget).map_or(&[], Vec::as_slice)
    }
}

/// Expenses keyed by currency.
pub type ExpenseReport = BTreeMap<CurrencyId, ExpenseGroup>;

/// Group budgeted withdrawals per currency and then per budget.
///
/// Journals that are not withdrawals, or that have no budget, are skipped.
/// Within a budget, expenses are sorted by date and then journal ID.
#[must_use]
pub fn group_expenses<'a, I>(journals: I) -> ExpenseReport
where
    I: IntoIterator<Item = &'a TransactionJournal>,
{
    let mut report = ExpenseReport::new();
    for journal in journals {
        let Some(budget_id) = journal.budget_id else {
            continue;
        };
        if !journal.is_expense_in(&[budget_id]) {
            continue;
        }
        report
            .entry(journal.currency_id)
            .or_insert_with(|| ExpenseGroup {
                currency_id: journal.currency_id,
                budgets: BTreeMap::new(),
            })
            .budgets
            .entry(budget_id)
            .or_default()
            .push(ExpenseJournal::from(journal));
    }
    for group in report.values_mut() {
        for expenses in group.budgets.values_mut() {
            expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.journal_id.cmp(&b.journal_id)));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transactions::journal::TransactionType;
    use crate::domain::transactions::journal::fixtures::withdrawal;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn groups_per_currency_then_budget() {
        let eur = withdrawal(1, dec!(10), at(2));
        let mut usd = withdrawal(2, dec!(20), at(3));
        usd.currency_id = CurrencyId::new(2);
        let mut other_budget = withdrawal(3, dec!(5), at(1));
        other_budget.budget_id = Some(BudgetId::new(9));

        let report = group_expenses([&eur, &usd, &other_budget]);

        assert_eq!(report.len(), 2);
        let eur_group = &report[&CurrencyId::new(1)];
        assert_eq!(eur_group.budgets.len(), 2);
        assert_eq!(eur_group.journals_for(BudgetId::new(1))[0].amount.value(), dec!(-10));
        let usd_group = &report[&CurrencyId::new(2)];
        assert_eq!(usd_group.journals_for(BudgetId::new(1))[0].amount.value(), dec!(-20));
    }

    #[test]
    fn skips_non_expenses() {
        let mut deposit = withdrawal(1, dec!(10), at(2));
        deposit.transaction_type = TransactionType::Deposit;
        let mut unbudgeted = withdrawal(2, dec!(10), at(2));
        unbudgeted.budget_id = None;

        assert!(group_expenses([&deposit, &unbudgeted]).is_empty());
    }

    #[test]
    fn foreign_amount_is_negated() {
        let mut journal = withdrawal(1, dec!(10), at(2));
        journal.foreign_currency_id = Some(CurrencyId::new(2));
        journal.foreign_amount = Some(Amount::new(dec!(11.20)));

        let expense = ExpenseJournal::from(&journal);
        assert_eq!(expense.foreign_amount, Some(Amount::new(dec!(-11.20))));
    }

    #[test]
    fn expenses_sorted_by_date() {
        let late = withdrawal(1, dec!(1), at(20));
        let early = withdrawal(2, dec!(2), at(5));
        let report = group_expenses([&late, &early]);
        let journals = report[&CurrencyId::new(1)].journals_for(BudgetId::new(1));
        assert_eq!(journals[0].journal_id, JournalId::new(2));
        assert_eq!(journals[1].journal_id, JournalId::new(1));
    }

    #[test]
    fn missing_budget_yields_empty_slice() {
        let report = group_expenses([&withdrawal(1, dec!(1), at(1))]);
        assert!(report[&CurrencyId::new(1)].journals_for(BudgetId::new(42)).is_empty());
    }
}
