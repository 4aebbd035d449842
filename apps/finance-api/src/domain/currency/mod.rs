//! Currency Bounded Context
//!
//! Transaction currencies and the exchange rates stored between them.

pub mod currency;
pub mod errors;
pub mod exchange_rate;
pub mod repository;

pub use currency::{BRIDGE_CURRENCY_CODE, TransactionCurrency, normalize_code};
pub use errors::{CurrencyError, ExchangeRateError};
pub use exchange_rate::ExchangeRate;
pub use repository::CurrencyRepository;
