//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: In-memory repositories filled from a YAML seed
//!   - `i18n/`: Translation tables read from YAML
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: JSON API controllers
//!
//! - `config/`: Dependency injection container

pub mod config;
pub mod http;
pub mod i18n;
pub mod persistence;
