//! Application Services
//!
//! Helpers shared by several use cases.

pub mod balance_calculator;
pub mod cache_key;
pub mod exchange_rate_converter;
pub mod response_cache;

pub use balance_calculator::BalanceCalculator;
pub use cache_key::cache_key;
pub use exchange_rate_converter::{CurrencySettings, ExchangeRateConverter, FallbackRates};
pub use response_cache::{DEFAULT_RESPONSE_TTL, ResponseCache};
