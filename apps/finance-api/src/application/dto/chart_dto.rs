//! Budget dashboard chart DTOs.

use serde::Serialize;

use crate::domain::currency::TransactionCurrency;
use crate::domain::shared::{Amount, DateRange, to_atom_string};

/// Spent, left and overspent figures in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChartEntriesDto {
    /// Sum of expenses (negative).
    pub spent: Amount,
    /// Remaining budget.
    pub left: Amount,
    /// Spend beyond the limit.
    pub overspent: Amount,
}

impl ChartEntriesDto {
    /// Entries for spending without a limit: nothing left or overspent.
    #[must_use]
    pub fn spent_only(spent: Amount) -> Self {
        Self {
            spent,
            ..Self::default()
        }
    }
}

/// One chart bar: a budget in one currency over one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetChartRowDto {
    /// Budget name.
    pub label: String,
    /// ID of the currency the entries are in.
    pub currency_id: String,
    /// ISO code of that currency.
    pub currency_code: String,
    /// Name of that currency.
    pub currency_name: String,
    /// Decimal places of that currency.
    pub currency_decimal_places: u32,
    /// ID of the native currency.
    pub native_id: String,
    /// ISO code of the native currency.
    pub native_code: String,
    /// Name of the native currency.
    pub native_name: String,
    /// Decimal places of the native currency.
    pub native_decimal_places: u32,
    /// Always null.
    pub period: Option<String>,
    /// Window start in ATOM notation.
    pub start: String,
    /// Window end in ATOM notation.
    pub end: String,
    /// Figures in the row's currency.
    pub entries: ChartEntriesDto,
    /// Figures converted to the native currency.
    pub native_entries: ChartEntriesDto,
}

impl BudgetChartRowDto {
    /// Build a row for a budget.
    #[must_use]
    pub fn new(
        label: &str,
        currency: &TransactionCurrency,
        native: &TransactionCurrency,
        window: &DateRange,
        entries: ChartEntriesDto,
        native_entries: ChartEntriesDto,
    ) -> Self {
        Self {
            label: label.to_string(),
            currency_id: currency.id.to_string(),
            currency_code: currency.code.clone(),
            currency_name: currency.name.clone(),
            currency_decimal_places: currency.decimal_places,
            native_id: native.id.to_string(),
            native_code: native.code.clone(),
            native_name: native.name.clone(),
            native_decimal_places: native.decimal_places,
            period: None,
            start: to_atom_string(window.start()),
            end: to_atom_string(window.end()),
            entries,
            native_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::CurrencyId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn row_serializes_with_string_ids_and_amounts() {
        let eur = TransactionCurrency::new(CurrencyId::new(1), "EUR", "Euro", "€", 2).unwrap();
        let window = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let entries = ChartEntriesDto::spent_only(Amount::new(dec!(-12.50)));
        let row = BudgetChartRowDto::new("Groceries", &eur, &eur, &window, entries, entries);

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["currency_id"], json!("1"));
        assert_eq!(value["period"], json!(null));
        assert_eq!(value["start"], json!("2024-01-01T00:00:00+00:00"));
        assert_eq!(value["end"], json!("2024-01-31T23:59:59+00:00"));
        assert_eq!(value["entries"]["spent"], json!("-12.50"));
        assert_eq!(value["entries"]["left"], json!("0"));
    }
}
