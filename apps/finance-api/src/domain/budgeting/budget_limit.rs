//! Budget limit entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::BudgetError;
use crate::domain::shared::{Amount, BudgetId, BudgetLimitId, CurrencyId, DateRange};

/// A cap on spend for a budget over a date span, denominated in one currency.
///
/// Only expenses in the limit's own currency count toward it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// Limit ID.
    pub id: BudgetLimitId,
    /// Budget the limit belongs to.
    pub budget_id: BudgetId,
    /// Currency of the limit amount.
    pub currency_id: CurrencyId,
    /// Maximum spend (non-negative).
    pub amount: Amount,
    /// First day of the limit.
    pub start_date: NaiveDate,
    /// Last day of the limit (inclusive).
    pub end_date: NaiveDate,
}

impl BudgetLimit {
    /// Create a limit, checking its amount and span.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or the span is inverted.
    pub fn new(
        id: BudgetLimitId,
        budget_id: BudgetId,
        currency_id: CurrencyId,
        amount: Amount,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, BudgetError> {
        if amount.is_negative() {
            return Err(BudgetError::InvalidLimit {
                limit_id: id,
                message: format!("amount {amount} is negative"),
            });
        }
        if end_date < start_date {
            return Err(BudgetError::InvalidLimit {
                limit_id: id,
                message: format!("ends on {end_date} before it starts on {start_date}"),
            });
        }
        Ok(Self {
            id,
            budget_id,
            currency_id,
            amount,
            start_date,
            end_date,
        })
    }

    /// The limit's own window, from the start of its first day to the end of its last.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored span is inverted.
    pub fn window(&self) -> Result<DateRange, BudgetError> {
        DateRange::from_dates(self.start_date, self.end_date).map_err(|e| {
            BudgetError::InvalidLimit {
                limit_id: self.id,
                message: e.to_string(),
            }
        })
    }

    /// Whether the limit overlaps the given reporting window.
    #[must_use]
    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps_days(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::to_atom_string;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn limit(amount: Amount, start: NaiveDate, end: NaiveDate) -> Result<BudgetLimit, BudgetError> {
        BudgetLimit::new(
            BudgetLimitId::new(1),
            BudgetId::new(1),
            CurrencyId::new(1),
            amount,
            start,
            end,
        )
    }

    #[test]
    fn window_runs_to_end_of_last_day() {
        let l = limit(Amount::new(dec!(100)), date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let window = l.window().unwrap();
        assert_eq!(to_atom_string(window.start()), "2024-03-01T00:00:00+00:00");
        assert_eq!(to_atom_string(window.end()), "2024-03-31T23:59:59+00:00");
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = limit(Amount::new(dec!(-1)), date(2024, 3, 1), date(2024, 3, 31)).unwrap_err();
        assert!(matches!(err, BudgetError::InvalidLimit { .. }));
    }

    #[test]
    fn inverted_span_is_rejected() {
        assert!(limit(Amount::new(dec!(1)), date(2024, 3, 31), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn overlap_with_reporting_window() {
        let l = limit(Amount::new(dec!(1)), date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let april = DateRange::from_dates(date(2024, 4, 1), date(2024, 4, 30)).unwrap();
        let q1 = DateRange::from_dates(date(2024, 1, 1), date(2024, 3, 1)).unwrap();
        assert!(!l.overlaps(&april));
        assert!(l.overlaps(&q1));
    }
}
