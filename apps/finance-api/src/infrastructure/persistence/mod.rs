//! Persistence Adapters
//!
//! In-memory implementations of the repository traits, filled from a YAML
//! seed file.

pub mod in_memory;
pub mod seed;

pub use in_memory::{
    InMemoryAccountRepository, InMemoryBudgetRepository, InMemoryCurrencyRepository,
    InMemoryPreferenceRepository, InMemoryTransactionRepository, InMemoryUserGroupRepository,
};
pub use seed::{InMemoryRepositories, SeedData, SeedError};
