//! Shared fixtures for use case tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::application::ports::UserGroup;
use crate::domain::budgeting::{Budget, BudgetLimit};
use crate::domain::currency::{ExchangeRate, TransactionCurrency};
use crate::domain::shared::{
    AccountId, Amount, BudgetId, BudgetLimitId, CurrencyId, JournalId, UserGroupId,
};
use crate::domain::transactions::{TransactionJournal, TransactionType};
use crate::infrastructure::persistence::InMemoryRepositories;

pub const EUR: CurrencyId = CurrencyId::new(1);
pub const USD: CurrencyId = CurrencyId::new(2);
pub const GROUP: UserGroupId = UserGroupId::new(1);

pub fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

pub fn at(m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap()
}

/// Group 1 with EUR, USD (1 USD = 0.9 EUR) and no budgets or accounts.
pub fn repositories() -> InMemoryRepositories {
    let repos = InMemoryRepositories::new();
    repos.user_groups.add(UserGroup {
        id: GROUP,
        title: "Household".to_string(),
    });
    repos
        .currencies
        .add_currency(TransactionCurrency::new(EUR, "EUR", "Euro", "€", 2).unwrap());
    repos
        .currencies
        .add_currency(TransactionCurrency::new(USD, "USD", "US Dollar", "$", 2).unwrap());
    repos.currencies.add_rate(ExchangeRate {
        from: USD,
        to: EUR,
        date: date(1, 1),
        rate: dec!(0.9),
    });
    repos
}

pub fn add_budget(repos: &InMemoryRepositories, id: u64, name: &str, order: u32) {
    repos.budgets.add_budget(Budget {
        id: BudgetId::new(id),
        user_group_id: GROUP,
        name: name.to_string(),
        active: true,
        order,
    });
}

pub fn add_limit(
    repos: &InMemoryRepositories,
    id: u64,
    budget: u64,
    currency: CurrencyId,
    amount: Decimal,
    span: (NaiveDate, NaiveDate),
) {
    repos.budgets.add_limit(
        BudgetLimit::new(
            BudgetLimitId::new(id),
            BudgetId::new(budget),
            currency,
            Amount::new(amount),
            span.0,
            span.1,
        )
        .unwrap(),
    );
}

pub fn journal(
    id: u64,
    budget: Option<u64>,
    currency: CurrencyId,
    amount: Decimal,
    date: DateTime<Utc>,
) -> TransactionJournal {
    TransactionJournal {
        id: JournalId::new(id),
        user_group_id: GROUP,
        transaction_type: TransactionType::Withdrawal,
        date,
        description: format!("journal #{id}"),
        source_id: AccountId::new(1),
        destination_id: AccountId::new(2),
        currency_id: currency,
        amount: Amount::new(amount),
        foreign_currency_id: None,
        foreign_amount: None,
        budget_id: budget.map(BudgetId::new),
    }
}
