//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    AccountId, Amount, BudgetId, BudgetLimitId, CurrencyId, DateRange, JournalId, UserGroupId,
    end_of_day, start_of_day, to_atom_string,
};
