//! Accounts Bounded Context
//!
//! Ledger accounts, the edits the accounts grid can make to them, and the
//! grid's column and sort options.

pub mod account;
pub mod account_type;
pub mod columns;
pub mod errors;
pub mod iban;
pub mod repository;
pub mod sorting;

pub use account::{Account, AccountChanges, AccountUpdate, MAX_NAME_LENGTH};
pub use account_type::{
    AccountRole, AccountType, AccountTypeFilter, InterestPeriod, LiabilityDirection,
};
pub use columns::{
    AccountColumn, ColumnSettings, ColumnState, column_preference_name, default_column_preference,
};
pub use errors::AccountError;
pub use iban::{is_valid_iban, normalize_iban};
pub use repository::AccountRepository;
pub use sorting::{AccountSort, SortColumn, SortDirection};
