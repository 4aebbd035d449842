//! Account types, roles and the type filter used by the accounts grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AccountError;

/// What an account represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// An account the user owns, such as a checking account.
    Asset,
    /// Where money is spent (shops, landlords).
    Expense,
    /// Where money comes from (employers).
    Revenue,
    /// Untracked cash.
    Cash,
    /// A loan the user took out or gave.
    Loan,
    /// A personal debt.
    Debt,
    /// A mortgage.
    Mortgage,
}

impl AccountType {
    /// Whether the account is a liability.
    #[must_use]
    pub const fn is_liability(self) -> bool {
        matches!(self, Self::Loan | Self::Debt | Self::Mortgage)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Expense => "expense",
            Self::Revenue => "revenue",
            Self::Cash => "cash",
            Self::Loan => "loan",
            Self::Debt => "debt",
            Self::Mortgage => "mortgage",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an asset account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountRole {
    /// Default asset account.
    DefaultAsset,
    /// Asset account shared with others.
    SharedAsset,
    /// Savings account.
    SavingAsset,
    /// Credit card.
    CcAsset,
    /// Cash wallet.
    CashWalletAsset,
}

impl FromStr for AccountRole {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defaultAsset" => Ok(Self::DefaultAsset),
            "sharedAsset" => Ok(Self::SharedAsset),
            "savingAsset" => Ok(Self::SavingAsset),
            "ccAsset" => Ok(Self::CcAsset),
            "cashWalletAsset" => Ok(Self::CashWalletAsset),
            other => Err(AccountError::validation(
                "account_role",
                format!("'{other}' is not a valid account role"),
            )),
        }
    }
}

/// Whether the user owes the liability or is owed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityDirection {
    /// Somebody owes the user.
    Credit,
    /// The user owes somebody.
    Debit,
}

/// How often liability interest is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestPeriod {
    /// Every day.
    Daily,
    /// Every month.
    Monthly,
    /// Every year.
    Yearly,
}

/// The `type` filter of the accounts grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccountTypeFilter {
    /// Every account.
    #[default]
    All,
    /// Asset accounts.
    Asset,
    /// Expense accounts.
    Expense,
    /// Revenue accounts.
    Revenue,
    /// Cash accounts.
    Cash,
    /// Loans, debts and mortgages.
    Liabilities,
}

impl AccountTypeFilter {
    /// Whether an account of the given type passes the filter.
    #[must_use]
    pub const fn matches(self, account_type: AccountType) -> bool {
        match self {
            Self::All => true,
            Self::Asset => matches!(account_type, AccountType::Asset),
            Self::Expense => matches!(account_type, AccountType::Expense),
            Self::Revenue => matches!(account_type, AccountType::Revenue),
            Self::Cash => matches!(account_type, AccountType::Cash),
            Self::Liabilities => account_type.is_liability(),
        }
    }

    /// Name used in URLs and preference keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Asset => "asset",
            Self::Expense => "expense",
            Self::Revenue => "revenue",
            Self::Cash => "cash",
            Self::Liabilities => "liabilities",
        }
    }
}

impl FromStr for AccountTypeFilter {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "asset" => Ok(Self::Asset),
            "expense" => Ok(Self::Expense),
            "revenue" => Ok(Self::Revenue),
            "cash" => Ok(Self::Cash),
            "liabilities" | "liability" => Ok(Self::Liabilities),
            other => Err(AccountError::validation(
                "type",
                format!("'{other}' is not a valid account type"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("asset", AccountType::Asset, true ; "asset matches asset")]
    #[test_case("asset", AccountType::Expense, false ; "asset rejects expense")]
    #[test_case("liabilities", AccountType::Mortgage, true ; "liabilities include mortgage")]
    #[test_case("liability", AccountType::Loan, true ; "singular liability alias")]
    #[test_case("all", AccountType::Revenue, true ; "all matches everything")]
    #[test_case("", AccountType::Cash, true ; "empty means all")]
    fn filter_matching(filter: &str, account_type: AccountType, expected: bool) {
        let filter: AccountTypeFilter = filter.parse().unwrap();
        assert_eq!(filter.matches(account_type), expected);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let err = "savings".parse::<AccountTypeFilter>().unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn roles_parse_from_camel_case() {
        assert_eq!("ccAsset".parse::<AccountRole>().unwrap(), AccountRole::CcAsset);
        assert!("creditCard".parse::<AccountRole>().is_err());
    }

    #[test]
    fn role_serializes_camel_case() {
        let json = serde_json::to_string(&AccountRole::SharedAsset).unwrap();
        assert_eq!(json, "\"sharedAsset\"");
    }
}
