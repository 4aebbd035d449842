//! Transactions Bounded Context
//!
//! Transaction journals and the expense views budgets are computed from.

pub mod errors;
pub mod expenses;
pub mod journal;
pub mod repository;

pub use errors::TransactionError;
pub use expenses::{ExpenseGroup, ExpenseJournal, ExpenseReport, group_expenses};
pub use journal::{TransactionJournal, TransactionType};
pub use repository::TransactionRepository;
