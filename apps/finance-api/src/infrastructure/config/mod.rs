//! Application wiring.

mod container;

pub use container::{
    AccountColumnsUseCaseFor, Container, DashboardUseCaseFor, ListAccountsUseCaseFor,
    ManagePreferencesUseCaseFor, Repositories, UpdateAccountUseCaseFor,
};
