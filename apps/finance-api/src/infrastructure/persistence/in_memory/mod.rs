//! In-memory repositories.
//!
//! Every adapter keeps its records behind a `RwLock` and is filled from the
//! seed file at startup or directly by tests.

mod accounts;
mod budgets;
mod currencies;
mod preferences;
mod transactions;
mod user_groups;

pub use accounts::InMemoryAccountRepository;
pub use budgets::InMemoryBudgetRepository;
pub use currencies::InMemoryCurrencyRepository;
pub use preferences::InMemoryPreferenceRepository;
pub use transactions::InMemoryTransactionRepository;
pub use user_groups::InMemoryUserGroupRepository;
