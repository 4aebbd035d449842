//! Account entity and the field edits the grid can submit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account_type::{AccountRole, AccountType, InterestPeriod, LiabilityDirection};
use super::errors::AccountError;
use super::iban::normalize_iban;
use crate::domain::shared::{AccountId, Amount, CurrencyId, UserGroupId};

/// Longest accepted account name, in characters.
pub const MAX_NAME_LENGTH: usize = 1024;

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Owning user group.
    pub user_group_id: UserGroupId,
    /// Display name, unique per type within a group.
    pub name: String,
    /// What the account represents.
    pub account_type: AccountType,
    /// Role, only set on asset accounts.
    #[serde(default)]
    pub account_role: Option<AccountRole>,
    /// Currency the account is kept in.
    pub currency_id: CurrencyId,
    /// Normalized IBAN without spaces.
    #[serde(default)]
    pub iban: Option<String>,
    /// Free-form account number.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Balance before the first journal.
    #[serde(default)]
    pub opening_balance: Amount,
    /// Inactive accounts are kept but hidden from pickers.
    pub active: bool,
    /// Position in user-defined ordering.
    #[serde(default)]
    pub order: u32,
    /// Liability side, only on liabilities.
    #[serde(default)]
    pub liability_direction: Option<LiabilityDirection>,
    /// Interest rate in percent, only on liabilities.
    #[serde(default)]
    pub interest: Option<Decimal>,
    /// Interest period, only on liabilities.
    #[serde(default)]
    pub interest_period: Option<InterestPeriod>,
    /// Creation moment.
    pub created_at: DateTime<Utc>,
    /// Last modification moment.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Liability type label (the account type itself), only on liabilities.
    #[must_use]
    pub fn liability_type(&self) -> Option<AccountType> {
        self.account_type
            .is_liability()
            .then_some(self.account_type)
    }

    /// Apply validated changes and stamp the modification time.
    pub fn apply(&mut self, changes: AccountChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(active) = changes.active {
            self.active = active;
        }
        if let Some(iban) = changes.iban {
            self.iban = iban;
        }
        if let Some(number) = changes.account_number {
            self.account_number = number;
        }
        if let Some(role) = changes.account_role {
            self.account_role = Some(role);
        }
        if let Some(order) = changes.order {
            self.order = order;
        }
        self.updated_at = now;
    }
}

/// Raw edit submitted for an account. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountUpdate {
    /// New name.
    pub name: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
    /// New IBAN; empty clears it.
    pub iban: Option<String>,
    /// New account number; empty clears it.
    pub account_number: Option<String>,
    /// New role, asset accounts only.
    pub account_role: Option<String>,
    /// New position.
    pub order: Option<i64>,
}

/// An [`AccountUpdate`] that passed field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    /// Trimmed new name.
    pub name: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
    /// Normalized IBAN, `Some(None)` clears it.
    pub iban: Option<Option<String>>,
    /// Account number, `Some(None)` clears it.
    pub account_number: Option<Option<String>>,
    /// Parsed role.
    pub account_role: Option<AccountRole>,
    /// New position.
    pub order: Option<u32>,
}

impl AccountChanges {
    /// Whether nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AccountUpdate {
    /// Validate every present field against the account being edited.
    ///
    /// Name uniqueness needs the repository and is checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(self, account: &Account) -> Result<AccountChanges, AccountError> {
        let name = self.name.map(|n| validate_name(&n)).transpose()?;
        let iban = self.iban.map(|i| normalize_iban(&i)).transpose()?;
        let account_number = self.account_number.map(|n| {
            let trimmed = n.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
        let account_role = match self.account_role {
            Some(role) if account.account_type != AccountType::Asset => {
                return Err(AccountError::validation(
                    "account_role",
                    format!("a {} account cannot have role '{role}'", account.account_type),
                ));
            }
            Some(role) => Some(role.parse::<AccountRole>()?),
            None => None,
        };
        let order = self
            .order
            .map(|o| {
                u32::try_from(o).map_err(|_| {
                    AccountError::validation("order", format!("{o} is not a valid position"))
                })
            })
            .transpose()?;
        Ok(AccountChanges {
            name,
            active: self.active,
            iban,
            account_number,
            account_role,
            order,
        })
    }
}

fn validate_name(name: &str) -> Result<String, AccountError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AccountError::validation("name", "the name must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AccountError::validation(
            "name",
            format!("the name may not be longer than {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// An active EUR asset account with no balance.
    pub fn asset(id: u64, name: &str) -> Account {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        Account {
            id: AccountId::new(id),
            user_group_id: UserGroupId::new(1),
            name: name.to_string(),
            account_type: AccountType::Asset,
            account_role: Some(AccountRole::DefaultAsset),
            currency_id: CurrencyId::new(1),
            iban: None,
            account_number: None,
            opening_balance: Amount::ZERO,
            active: true,
            order: 0,
            liability_direction: None,
            interest: None,
            interest_period: None,
            created_at: created,
            updated_at: created,
        }
    }
}
