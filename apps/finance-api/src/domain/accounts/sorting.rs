//! Sort options of the accounts grid.

use std::str::FromStr;

use super::errors::AccountError;

/// Column the grid can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// Account name, case-insensitive.
    Name,
    /// Active flag.
    Active,
    /// IBAN.
    Iban,
    /// Account number.
    Number,
    /// Balance today.
    CurrentBalance,
    /// Date of the latest journal.
    LastActivity,
    /// Balance change over the selected period.
    BalanceDifference,
    /// User-defined position.
    Order,
}

impl FromStr for SortColumn {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "active" => Ok(Self::Active),
            "iban" => Ok(Self::Iban),
            "number" | "account_number" => Ok(Self::Number),
            "current_balance" => Ok(Self::CurrentBalance),
            "last_activity" => Ok(Self::LastActivity),
            "balance_difference" => Ok(Self::BalanceDifference),
            "order" => Ok(Self::Order),
            other => Err(AccountError::validation(
                "column",
                format!("cannot sort by '{other}'"),
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AccountError::validation(
                "direction",
                format!("'{other}' is not asc or desc"),
            )),
        }
    }
}

/// Requested ordering. Without a column the grid uses `order`, then name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountSort {
    /// Sort column, if any.
    pub column: Option<SortColumn>,
    /// Direction applied to the column.
    pub direction: SortDirection,
}

impl AccountSort {
    /// Parse the optional `column` and `direction` query values.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown columns or directions.
    pub fn parse(column: Option<&str>, direction: Option<&str>) -> Result<Self, AccountError> {
        let column = column
            .filter(|c| !c.is_empty())
            .map(str::parse)
            .transpose()?;
        let direction = direction.map(str::parse).transpose()?.unwrap_or_default();
        Ok(Self { column, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sort_uses_defaults() {
        let sort = AccountSort::parse(Some(""), None).unwrap();
        assert_eq!(sort, AccountSort::default());
    }

    #[test]
    fn parses_column_and_direction() {
        let sort = AccountSort::parse(Some("current_balance"), Some("DESC")).unwrap();
        assert_eq!(sort.column, Some(SortColumn::CurrentBalance));
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = AccountSort::parse(Some("color"), None).unwrap_err();
        assert_eq!(err.field(), Some("column"));
        let err = AccountSort::parse(None, Some("sideways")).unwrap_err();
        assert_eq!(err.field(), Some("direction"));
    }
}
