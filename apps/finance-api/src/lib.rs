// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Finance API - Rust Core Library
//!
//! JSON API behind the personal-finance dashboard: budget spend against
//! limits, the accounts grid, user preferences and translation tables.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Entities, value objects and repository ports
//!   - `budgeting`: Budgets, limits, left/overspent evaluation
//!   - `transactions`: Journals and budget expense queries
//!   - `currency`: Currencies and stored exchange rates
//!   - `accounts`: Accounts, edits, grid sorting and columns
//!   - `preferences`: Named JSON settings
//!
//! - **Application**: Use cases and orchestration
//!   - `services`: Exchange-rate converter, balances, cache key, response cache
//!   - `use_cases`: `BudgetDashboard`, `ListAccounts`, `UpdateAccount`,
//!     `AccountColumns`, `ManagePreferences`
//!   - `dto`: Response shapes of the JSON API
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: In-memory repositories and YAML seed data
//!   - `http`: Axum controllers
//!   - `i18n`: Translation tables
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Logging and Prometheus metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::services::{CurrencySettings, ExchangeRateConverter, cache_key};
pub use domain::shared::{Amount, DateRange};
pub use infrastructure::config::{Container, Repositories};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::i18n::Translator;
pub use infrastructure::persistence::{InMemoryRepositories, SeedData};
