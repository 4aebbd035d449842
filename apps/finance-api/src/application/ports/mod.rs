//! Application Ports (Driven)
//!
//! Interfaces the use cases need beyond the domain repositories.

mod activity_port;
mod user_group_port;

pub use activity_port::{ActivityPort, InMemoryActivityTracker};
pub use user_group_port::{UserGroup, UserGroupError, UserGroupPort};
