//! Shared value objects.

mod amount;
mod date_range;
mod identifiers;

pub use amount::Amount;
pub use date_range::{DateRange, end_of_day, start_of_day, to_atom_string};
pub use identifiers::{AccountId, BudgetId, BudgetLimitId, CurrencyId, JournalId, UserGroupId};
