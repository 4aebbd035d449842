//! Budgeting Bounded Context
//!
//! Budgets, the limits set on them, and how spending compares to a limit.

pub mod budget;
pub mod budget_limit;
pub mod errors;
pub mod repository;
pub mod services;

pub use budget::Budget;
pub use budget_limit::BudgetLimit;
pub use errors::BudgetError;
pub use repository::BudgetRepository;
pub use services::{LimitOutcome, LimitStatus};
