//! Transaction currency entity.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{CurrencyId, DomainError};

/// ISO code of the currency used to bridge exchange rates.
pub const BRIDGE_CURRENCY_CODE: &str = "EUR";

/// A currency transactions, limits and accounts can be denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCurrency {
    /// Currency ID.
    pub id: CurrencyId,
    /// ISO 4217 code, e.g. `EUR`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Display symbol.
    pub symbol: String,
    /// Number of decimal places amounts are shown with.
    pub decimal_places: u32,
    /// Whether the currency can be used for new records.
    pub enabled: bool,
}

impl TransactionCurrency {
    /// Create a currency, validating its code and precision.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not three ASCII letters or the decimal
    /// places exceed 12.
    pub fn new(
        id: CurrencyId,
        code: &str,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimal_places: u32,
    ) -> Result<Self, DomainError> {
        let code = normalize_code(code)?;
        if decimal_places > 12 {
            return Err(DomainError::invalid(
                "decimal_places",
                format!("{decimal_places} exceeds the maximum of 12"),
            ));
        }
        Ok(Self {
            id,
            code,
            name: name.into(),
            symbol: symbol.into(),
            decimal_places,
            enabled: true,
        })
    }

    /// Whether this is the currency exchange rates are bridged through.
    #[must_use]
    pub fn is_bridge(&self) -> bool {
        self.code == BRIDGE_CURRENCY_CODE
    }
}

/// Validate and uppercase an ISO 4217 currency code.
///
/// # Errors
///
/// Returns an error unless the code is exactly three ASCII letters.
pub fn normalize_code(code: &str) -> Result<String, DomainError> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::invalid(
            "currency_code",
            format!("'{code}' is not a three-letter currency code"),
        ));
    }
    Ok(trimmed.to_ascii_uppercase())
}
