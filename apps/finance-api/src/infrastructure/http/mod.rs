//! HTTP API (Driver Adapter)
//!
//! JSON endpoints consumed by the dashboard frontend.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
