//! List Accounts Use Case
//!
//! Pages through the accounts grid with balances, last activity and the
//! balance change over an optional period.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::dto::{
    AccountDto, AccountFigures, AccountListDto, AccountSingleDto, ListMetaDto, PaginationDto,
};
use crate::application::errors::ApplicationError;
use crate::application::services::{BalanceCalculator, CurrencySettings, ExchangeRateConverter};
use crate::domain::accounts::{
    Account, AccountError, AccountRepository, AccountSort, AccountTypeFilter, SortColumn,
    SortDirection,
};
use crate::domain::currency::{CurrencyRepository, TransactionCurrency};
use crate::domain::shared::{AccountId, Amount, DateRange, UserGroupId, to_atom_string};
use crate::domain::transactions::TransactionRepository;

/// One page request of the accounts grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountListQuery {
    /// Account types to include.
    pub filter: AccountTypeFilter,
    /// Sort column and direction.
    pub sort: AccountSort,
    /// 1-based page number.
    pub page: usize,
    /// Page size; the configured default when absent.
    pub limit: Option<usize>,
    /// Period for the balance difference.
    pub period: Option<DateRange>,
}

/// An account with everything the grid sorts on.
struct AccountRow {
    account: Account,
    currency: TransactionCurrency,
    figures: AccountFigures,
    last_activity: Option<DateTime<Utc>>,
}

/// Use case for listing and showing accounts.
pub struct ListAccountsUseCase<A, T, C>
where
    A: AccountRepository,
    T: TransactionRepository,
    C: CurrencyRepository,
{
    accounts: Arc<A>,
    transactions: Arc<T>,
    currencies: Arc<C>,
    balances: BalanceCalculator<T>,
    settings: CurrencySettings,
    page_size: usize,
}

impl<A, T, C> ListAccountsUseCase<A, T, C>
where
    A: AccountRepository,
    T: TransactionRepository,
    C: CurrencyRepository,
{
    /// Create a new ListAccountsUseCase.
    pub fn new(
        accounts: Arc<A>,
        transactions: Arc<T>,
        currencies: Arc<C>,
        settings: CurrencySettings,
        page_size: usize,
    ) -> Self {
        Self {
            accounts,
            balances: BalanceCalculator::new(Arc::clone(&transactions)),
            transactions,
            currencies,
            settings,
            page_size: page_size.max(1),
        }
    }

    /// List one page of accounts.
    #[tracing::instrument(skip(self), fields(filter = query.filter.as_str()))]
    pub async fn list(
        &self,
        group: UserGroupId,
        query: AccountListQuery,
    ) -> Result<AccountListDto, ApplicationError> {
        let mut converter = self.settings.converter(Arc::clone(&self.currencies));
        let native = converter.native_currency(&self.settings).await?;
        let now = Utc::now();

        let mut rows = Vec::new();
        for account in self.accounts.list(group, query.filter).await? {
            rows.push(
                self.row(&mut converter, account, &native, query.period, now)
                    .await?,
            );
        }
        sort_rows(&mut rows, query.sort);

        let per_page = query.limit.unwrap_or(self.page_size).max(1);
        let page = query.page.max(1);
        let total = rows.len();
        let data: Vec<AccountDto> = rows
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .map(|row| AccountDto::from_account(&row.account, &row.currency, &native, row.figures))
            .collect();

        tracing::debug!(total, count = data.len(), page, "Listed accounts");
        Ok(AccountListDto {
            meta: ListMetaDto {
                pagination: PaginationDto::new(total, data.len(), per_page, page),
            },
            data,
        })
    }

    /// A single account document.
    #[tracing::instrument(skip(self))]
    pub async fn show(
        &self,
        group: UserGroupId,
        id: AccountId,
        period: Option<DateRange>,
    ) -> Result<AccountSingleDto, ApplicationError> {
        let account = self
            .accounts
            .find_by_id(group, id)
            .await?
            .ok_or(AccountError::NotFound(id))?;
        let mut converter = self.settings.converter(Arc::clone(&self.currencies));
        let native = converter.native_currency(&self.settings).await?;
        let row = self
            .row(&mut converter, account, &native, period, Utc::now())
            .await?;
        Ok(AccountSingleDto {
            data: AccountDto::from_account(&row.account, &row.currency, &native, row.figures),
        })
    }

    async fn row(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        account: Account,
        native: &TransactionCurrency,
        period: Option<DateRange>,
        now: DateTime<Utc>,
    ) -> Result<AccountRow, ApplicationError> {
        let currency = converter.currency(account.currency_id).await?;
        let balance_date = period.map_or(now, |p| p.end());

        let current_balance = self
            .balances
            .balance_at(converter, &account, &currency, balance_date)
            .await?;
        let native_current_balance = converter
            .convert(current_balance, &currency, native, balance_date.date_naive())
            .await?;

        let (balance_difference, native_balance_difference) = match period {
            Some(period) => {
                let opening = self
                    .balances
                    .balance_before(converter, &account, &currency, period.start())
                    .await?;
                let native_opening = converter
                    .convert(opening, &currency, native, period.start().date_naive())
                    .await?;
                (
                    Some(current_balance - opening),
                    Some(native_current_balance - native_opening),
                )
            }
            None => (None, None),
        };

        let last_activity = self
            .transactions
            .last_activity(account.user_group_id, account.id)
            .await?;

        Ok(AccountRow {
            figures: AccountFigures {
                current_balance,
                native_current_balance,
                current_balance_date: to_atom_string(balance_date),
                last_activity: last_activity.map(to_atom_string),
                balance_difference,
                native_balance_difference,
            },
            account,
            currency,
            last_activity,
        })
    }
}

/// Sort by `order` then name, then by the requested column if any.
fn sort_rows(rows: &mut [AccountRow], sort: AccountSort) {
    rows.sort_by(|a, b| {
        a.account
            .order
            .cmp(&b.account.order)
            .then_with(|| compare_names(&a.account, &b.account))
    });
    let Some(column) = sort.column else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = compare_by(column, a, b);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_names(a: &Account, b: &Account) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn compare_by(column: SortColumn, a: &AccountRow, b: &AccountRow) -> Ordering {
    match column {
        SortColumn::Name => compare_names(&a.account, &b.account),
        SortColumn::Active => a.account.active.cmp(&b.account.active),
        SortColumn::Iban => a.account.iban.cmp(&b.account.iban),
        SortColumn::Number => a.account.account_number.cmp(&b.account.account_number),
        SortColumn::CurrentBalance => a.figures.current_balance.cmp(&b.figures.current_balance),
        SortColumn::LastActivity => a.last_activity.cmp(&b.last_activity),
        SortColumn::BalanceDifference => difference(a).cmp(&difference(b)),
        SortColumn::Order => a.account.order.cmp(&b.account.order),
    }
}

fn difference(row: &AccountRow) -> Amount {
    row.figures.balance_difference.unwrap_or_default()
}
