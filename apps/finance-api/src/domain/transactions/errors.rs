//! Transaction errors.

use thiserror::Error;

/// Errors that can occur while reading transaction journals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The backing store failed.
    #[error("Transaction repository failure: {0}")]
    Repository(String),
}
