//! Domain Layer
//!
//! Entities, value objects and repository ports, free of HTTP and storage
//! concerns.

pub mod accounts;
pub mod budgeting;
pub mod currency;
pub mod preferences;
pub mod shared;
pub mod transactions;
