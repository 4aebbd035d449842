//! Data Transfer Objects
//!
//! Response and request shapes at the API boundary.

mod account_dto;
mod chart_dto;
mod preference_dto;

pub use account_dto::{
    ACCOUNT_RESOURCE_TYPE, AccountAttributesDto, AccountColumnsDto, AccountDto, AccountFigures,
    AccountListDto, AccountSingleDto, ListMetaDto, PaginationDto,
};
pub use chart_dto::{BudgetChartRowDto, ChartEntriesDto};
pub use preference_dto::{
    CreatePreferenceDto, PreferenceAttributesDto, PreferenceDto, PreferenceSingleDto,
    UpdatePreferenceDto,
};
