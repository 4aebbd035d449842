//! Budgeting domain services.

pub mod limit_evaluation;

pub use limit_evaluation::{LimitOutcome, LimitStatus};
