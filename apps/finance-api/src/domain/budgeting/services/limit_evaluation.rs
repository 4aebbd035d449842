//! Comparison of a budget limit against the amount spent under it.

use crate::domain::shared::Amount;

/// Where spending stands relative to a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    /// The limit is larger than what was spent; something is left.
    Within,
    /// Spending met or exceeded the limit.
    Exceeded,
}

/// Left-to-spend and overspent figures for one limit. At most one is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitOutcome {
    /// Remaining budget (zero when exceeded).
    pub left: Amount,
    /// Amount spent beyond the limit (zero when within).
    pub overspent: Amount,
}

impl LimitStatus {
    /// Compare a limit with spending. `spent` is signed; expenses are negative.
    #[must_use]
    pub fn evaluate(limit: Amount, spent: Amount) -> Self {
        if limit > spent.positive() {
            Self::Within
        } else {
            Self::Exceeded
        }
    }

    /// Compute left/overspent for the given limit and spend.
    ///
    /// The status comes from the limit's own currency and is applied
    /// unchanged to the native figures.
    #[must_use]
    pub fn outcome(self, limit: Amount, spent: Amount) -> LimitOutcome {
        match self {
            Self::Within => LimitOutcome {
                left: limit + spent,
                overspent: Amount::ZERO,
            },
            Self::Exceeded => LimitOutcome {
                left: Amount::ZERO,
                overspent: (limit + spent).positive(),
            },
        }
    }
}
