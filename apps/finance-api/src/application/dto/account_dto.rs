//! Accounts grid DTOs, shaped like JSON:API documents.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::accounts::{
    Account, AccountRole, AccountType, ColumnSettings, InterestPeriod, LiabilityDirection,
};
use crate::domain::currency::TransactionCurrency;
use crate::domain::shared::{Amount, to_atom_string};

/// JSON:API resource type of accounts.
pub const ACCOUNT_RESOURCE_TYPE: &str = "accounts";

/// Computed figures shown next to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFigures {
    /// Balance now, in the account's currency.
    pub current_balance: Amount,
    /// Balance now, in the native currency.
    pub native_current_balance: Amount,
    /// Moment the balances were taken.
    pub current_balance_date: String,
    /// Latest journal date (ATOM), if any.
    pub last_activity: Option<String>,
    /// Balance change over the requested period.
    pub balance_difference: Option<Amount>,
    /// Balance change over the requested period, in the native currency.
    pub native_balance_difference: Option<Amount>,
}

/// Attributes of an account resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountAttributesDto {
    /// Creation moment (ATOM).
    pub created_at: String,
    /// Last modification moment (ATOM).
    pub updated_at: String,
    /// Active flag.
    pub active: bool,
    /// Position in user-defined ordering.
    pub order: u32,
    /// Name.
    pub name: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Asset role.
    pub account_role: Option<AccountRole>,
    /// Account currency ID.
    pub currency_id: String,
    /// Account currency code.
    pub currency_code: String,
    /// Account currency symbol.
    pub currency_symbol: String,
    /// Account currency decimal places.
    pub currency_decimal_places: u32,
    /// Native currency ID.
    pub native_currency_id: String,
    /// Native currency code.
    pub native_currency_code: String,
    /// Native currency symbol.
    pub native_currency_symbol: String,
    /// Native currency decimal places.
    pub native_currency_decimal_places: u32,
    /// Balance now.
    pub current_balance: Amount,
    /// Balance now, native.
    pub native_current_balance: Amount,
    /// Moment the balances were taken (ATOM).
    pub current_balance_date: String,
    /// IBAN without spaces.
    pub iban: Option<String>,
    /// Account number.
    pub account_number: Option<String>,
    /// Latest journal date (ATOM).
    pub last_activity: Option<String>,
    /// Balance change over the requested period.
    pub balance_difference: Option<Amount>,
    /// Balance change over the requested period, native.
    pub native_balance_difference: Option<Amount>,
    /// Loan, debt or mortgage.
    pub liability_type: Option<AccountType>,
    /// Credit or debit.
    pub liability_direction: Option<LiabilityDirection>,
    /// Interest in percent.
    pub interest: Option<Decimal>,
    /// Interest period.
    pub interest_period: Option<InterestPeriod>,
    /// Outstanding amount of a liability.
    pub amount_due: Option<Amount>,
}

/// An account resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDto {
    /// Always `accounts`.
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    /// Account ID as a string.
    pub id: String,
    /// Attributes.
    pub attributes: AccountAttributesDto,
}

impl AccountDto {
    /// Build the resource from an account and its computed figures.
    #[must_use]
    pub fn from_account(
        account: &Account,
        currency: &TransactionCurrency,
        native: &TransactionCurrency,
        figures: AccountFigures,
    ) -> Self {
        let liability = account.account_type.is_liability();
        Self {
            resource_type: ACCOUNT_RESOURCE_TYPE,
            id: account.id.to_string(),
            attributes: AccountAttributesDto {
                created_at: to_atom_string(account.created_at),
                updated_at: to_atom_string(account.updated_at),
                active: account.active,
                order: account.order,
                name: account.name.clone(),
                account_type: account.account_type,
                account_role: account.account_role,
                currency_id: currency.id.to_string(),
                currency_code: currency.code.clone(),
                currency_symbol: currency.symbol.clone(),
                currency_decimal_places: currency.decimal_places,
                native_currency_id: native.id.to_string(),
                native_currency_code: native.code.clone(),
                native_currency_symbol: native.symbol.clone(),
                native_currency_decimal_places: native.decimal_places,
                current_balance: figures.current_balance,
                native_current_balance: figures.native_current_balance,
                current_balance_date: figures.current_balance_date,
                iban: account.iban.clone(),
                account_number: account.account_number.clone(),
                last_activity: figures.last_activity,
                balance_difference: figures.balance_difference,
                native_balance_difference: figures.native_balance_difference,
                liability_type: account.liability_type(),
                liability_direction: account.liability_direction,
                interest: account.interest,
                interest_period: account.interest_period,
                amount_due: liability.then(|| figures.current_balance.positive()),
            },
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationDto {
    /// Total matching resources.
    pub total: usize,
    /// Resources on this page.
    pub count: usize,
    /// Page size.
    pub per_page: usize,
    /// 1-based page number.
    pub current_page: usize,
    /// Number of pages (at least 1).
    pub total_pages: usize,
}

impl PaginationDto {
    /// Pagination for `total` items, page `page` of size `per_page`.
    #[must_use]
    pub fn new(total: usize, count: usize, per_page: usize, page: usize) -> Self {
        Self {
            total,
            count,
            per_page,
            current_page: page,
            total_pages: total.div_ceil(per_page.max(1)).max(1),
        }
    }
}

/// `meta` block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListMetaDto {
    /// Pagination details.
    pub pagination: PaginationDto,
}

/// A page of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountListDto {
    /// Accounts on the page.
    pub data: Vec<AccountDto>,
    /// Pagination.
    pub meta: ListMetaDto,
}

/// A single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSingleDto {
    /// The account.
    pub data: AccountDto,
}

/// Column layout of an accounts grid type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountColumnsDto {
    /// Grid type (`asset`, `liabilities`, ...).
    #[serde(rename = "type")]
    pub grid_type: String,
    /// Preference the enabled flags are stored in.
    pub preference: String,
    /// Column states keyed by column.
    pub columns: ColumnSettings,
}
