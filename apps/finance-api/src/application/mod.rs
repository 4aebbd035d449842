//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces the use cases need beyond the repositories
//! - **Services**: Currency conversion, balances and response caching
//! - **Use Cases**: One per API operation
//! - **DTOs**: Data transfer objects for API boundaries

pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use errors::ApplicationError;
pub use ports::*;
pub use use_cases::*;
