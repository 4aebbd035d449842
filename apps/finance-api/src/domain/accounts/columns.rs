//! Column layout of the accounts grid.
//!
//! Visibility is fixed per account type. Whether a visible column is enabled is
//! a user setting stored as a preference named `accts_columns_{type}`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use super::account_type::AccountTypeFilter;

/// A column of the accounts grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountColumn {
    /// Drag handle for re-ordering.
    DragAndDrop,
    /// Active flag.
    Active,
    /// Account name.
    Name,
    /// Asset role.
    Type,
    /// Loan, debt or mortgage.
    LiabilityType,
    /// Credit or debit.
    LiabilityDirection,
    /// Interest rate and period.
    LiabilityInterest,
    /// IBAN or account number.
    Number,
    /// Balance today.
    CurrentBalance,
    /// Outstanding liability amount.
    AmountDue,
    /// Date of the latest journal.
    LastActivity,
    /// Balance change over the selected period.
    BalanceDifference,
    /// Row actions.
    Menu,
}

impl AccountColumn {
    /// Every column, in display order.
    pub const ALL: [Self; 13] = [
        Self::DragAndDrop,
        Self::Active,
        Self::Name,
        Self::Type,
        Self::LiabilityType,
        Self::LiabilityDirection,
        Self::LiabilityInterest,
        Self::Number,
        Self::CurrentBalance,
        Self::AmountDue,
        Self::LastActivity,
        Self::BalanceDifference,
        Self::Menu,
    ];

    /// Key used in the stored preference.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DragAndDrop => "drag_and_drop",
            Self::Active => "active",
            Self::Name => "name",
            Self::Type => "type",
            Self::LiabilityType => "liability_type",
            Self::LiabilityDirection => "liability_direction",
            Self::LiabilityInterest => "liability_interest",
            Self::Number => "number",
            Self::CurrentBalance => "current_balance",
            Self::AmountDue => "amount_due",
            Self::LastActivity => "last_activity",
            Self::BalanceDifference => "balance_difference",
            Self::Menu => "menu",
        }
    }

    /// Column stored under the given preference key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    /// Whether the column is shown at all for the given grid type.
    #[must_use]
    pub const fn visible_for(self, filter: AccountTypeFilter) -> bool {
        let liabilities = matches!(filter, AccountTypeFilter::Liabilities);
        match self {
            Self::Type => matches!(filter, AccountTypeFilter::Asset),
            Self::LiabilityType
            | Self::LiabilityDirection
            | Self::LiabilityInterest
            | Self::AmountDue => liabilities,
            Self::CurrentBalance => !liabilities,
            _ => true,
        }
    }
}

/// Name of the preference holding the column settings of a grid type.
#[must_use]
pub fn column_preference_name(filter: AccountTypeFilter) -> String {
    format!("accts_columns_{}", filter.as_str())
}

/// Settings used when the user never saved any.
#[must_use]
pub fn default_column_preference() -> Value {
    json!({ "drag_and_drop": false })
}

/// One column as the grid renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnState {
    /// Fixed by account type.
    pub visible: bool,
    /// User-configurable.
    pub enabled: bool,
}

/// Full column layout for a grid type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSettings(BTreeMap<&'static str, ColumnState>);

impl ColumnSettings {
    /// Resolve the layout from a stored preference value.
    ///
    /// Columns the preference does not mention, or maps to anything but
    /// `false`, are enabled. Unknown keys are ignored.
    #[must_use]
    pub fn resolve(filter: AccountTypeFilter, stored: &Value) -> Self {
        let columns = AccountColumn::ALL
            .iter()
            .map(|&column| {
                let enabled = stored
                    .get(column.key())
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                (
                    column.key(),
                    ColumnState {
                        visible: column.visible_for(filter),
                        enabled,
                    },
                )
            })
            .collect();
        Self(columns)
    }

    /// State of one column.
    #[must_use]
    pub fn get(&self, column: AccountColumn) -> Option<ColumnState> {
        self.0.get(column.key()).copied()
    }

    /// The preference value that stores only the `enabled` flags.
    #[must_use]
    pub fn to_preference(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .0
            .iter()
            .map(|(key, state)| ((*key).to_string(), Value::Bool(state.enabled)))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disables_drag_and_drop_only() {
        let settings =
            ColumnSettings::resolve(AccountTypeFilter::Asset, &default_column_preference());
        assert!(!settings.get(AccountColumn::DragAndDrop).unwrap().enabled);
        assert!(settings.get(AccountColumn::Name).unwrap().enabled);
        assert!(settings.get(AccountColumn::Menu).unwrap().enabled);
    }

    #[test]
    fn visibility_depends_on_type() {
        let asset = ColumnSettings::resolve(AccountTypeFilter::Asset, &json!({}));
        assert!(asset.get(AccountColumn::Type).unwrap().visible);
        assert!(asset.get(AccountColumn::CurrentBalance).unwrap().visible);
        assert!(!asset.get(AccountColumn::AmountDue).unwrap().visible);

        let liabilities = ColumnSettings::resolve(AccountTypeFilter::Liabilities, &json!({}));
        assert!(!liabilities.get(AccountColumn::Type).unwrap().visible);
        assert!(!liabilities.get(AccountColumn::CurrentBalance).unwrap().visible);
        assert!(liabilities.get(AccountColumn::LiabilityInterest).unwrap().visible);
        assert!(liabilities.get(AccountColumn::AmountDue).unwrap().visible);
    }

    #[test]
    fn null_and_unknown_entries_fall_back_to_enabled() {
        let stored = json!({ "name": null, "bogus": false, "menu": false });
        let settings = ColumnSettings::resolve(AccountTypeFilter::Expense, &stored);
        assert!(settings.get(AccountColumn::Name).unwrap().enabled);
        assert!(!settings.get(AccountColumn::Menu).unwrap().enabled);
        assert!(settings.to_preference().get("bogus").is_none());
    }

    #[test]
    fn preference_name_per_type() {
        assert_eq!(
            column_preference_name(AccountTypeFilter::Liabilities),
            "accts_columns_liabilities"
        );
    }
}
