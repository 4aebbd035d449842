//! HTTP request DTOs and their validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::response::{ApiError, ValidationErrors};
use crate::application::use_cases::AccountListQuery;
use crate::domain::accounts::{AccountSort, AccountTypeFilter};
use crate::domain::shared::{DateRange, UserGroupId};

/// Dates must fall strictly after this day.
const EARLIEST_DATE: (i32, u32, u32) = (1900, 1, 1);

/// Dates must fall strictly before this day.
const LATEST_DATE: (i32, u32, u32) = (2099, 12, 31);

/// Query of the dashboard chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRequest {
    /// First day, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub end: Option<String>,
    /// Group to report on.
    pub user_group_id: Option<String>,
}

impl DateRequest {
    /// Validate both dates into a whole-day range.
    pub fn date_range(&self) -> Result<DateRange, ApiError> {
        let mut errors = ValidationErrors::default();
        let start = required_date(&mut errors, "start", self.start.as_deref());
        let end = required_date(&mut errors, "end", self.end.as_deref());
        let range = range_of(&mut errors, start, end);
        errors.into_result()?;
        range.ok_or_else(|| ApiError::validation("end", "The end field is required."))
    }

    /// The requested group, if any.
    pub fn user_group(&self) -> Result<Option<UserGroupId>, ApiError> {
        parse_user_group(self.user_group_id.as_deref())
    }
}

/// Query of the accounts grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountListRequest {
    /// Account type filter.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// 1-based page.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Sort column.
    pub column: Option<String>,
    /// Sort direction.
    pub direction: Option<String>,
    /// Start of the balance-difference period.
    pub start: Option<String>,
    /// End of the balance-difference period.
    pub end: Option<String>,
    /// Group to list.
    pub user_group_id: Option<String>,
}

impl AccountListRequest {
    /// Validate the query into a page request.
    pub fn to_query(&self) -> Result<AccountListQuery, ApiError> {
        let mut errors = ValidationErrors::default();

        let filter = self
            .account_type
            .as_deref()
            .unwrap_or_default()
            .parse::<AccountTypeFilter>()
            .map_err(|e| record(&mut errors, &e))
            .ok();
        let sort = AccountSort::parse(self.column.as_deref(), self.direction.as_deref())
            .map_err(|e| record(&mut errors, &e))
            .ok();
        let page = positive_integer(&mut errors, "page", self.page.as_deref());
        let limit = positive_integer(&mut errors, "limit", self.limit.as_deref());
        let period = optional_period(&mut errors, self.start.as_deref(), self.end.as_deref());

        errors.into_result()?;
        Ok(AccountListQuery {
            filter: filter.unwrap_or_default(),
            sort: sort.unwrap_or_default(),
            page: page.unwrap_or(1),
            limit,
            period,
        })
    }

    /// The requested group, if any.
    pub fn user_group(&self) -> Result<Option<UserGroupId>, ApiError> {
        parse_user_group(self.user_group_id.as_deref())
    }
}

/// Query of a single-account request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountShowRequest {
    /// Start of the balance-difference period.
    pub start: Option<String>,
    /// End of the balance-difference period.
    pub end: Option<String>,
    /// Group owning the account.
    pub user_group_id: Option<String>,
}

impl AccountShowRequest {
    /// The optional balance-difference period.
    pub fn period(&self) -> Result<Option<DateRange>, ApiError> {
        let mut errors = ValidationErrors::default();
        let period = optional_period(&mut errors, self.start.as_deref(), self.end.as_deref());
        errors.into_result()?;
        Ok(period)
    }

    /// The requested group, if any.
    pub fn user_group(&self) -> Result<Option<UserGroupId>, ApiError> {
        parse_user_group(self.user_group_id.as_deref())
    }
}

/// Query carrying only the group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGroupRequest {
    /// Group the request is scoped to.
    pub user_group_id: Option<String>,
}

impl UserGroupRequest {
    /// The requested group, if any.
    pub fn user_group(&self) -> Result<Option<UserGroupId>, ApiError> {
        parse_user_group(self.user_group_id.as_deref())
    }
}

fn record(errors: &mut ValidationErrors, error: &crate::domain::accounts::AccountError) {
    errors.add(error.field().unwrap_or("query"), error.to_string());
}

fn parse_user_group(raw: Option<&str>) -> Result<Option<UserGroupId>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<UserGroupId>().map(Some).map_err(|_| {
            ApiError::validation("user_group_id", "The user group id field must be an integer.")
        }),
    }
}

fn positive_integer(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> Option<usize> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<usize>() {
        Ok(value) if value >= 1 => Some(value),
        _ => {
            errors.add(field, format!("The {field} field must be an integer of at least 1."));
            None
        }
    }
}

fn required_date(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        errors.add(field, format!("The {field} field is required."));
        return None;
    };
    parse_date(errors, field, raw)
}

fn parse_date(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    let parsed = (raw.len() == 10)
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten();
    let Some(date) = parsed else {
        errors.add(field, format!("The {field} field must match the format Y-m-d."));
        return None;
    };

    let (ey, em, ed) = EARLIEST_DATE;
    let (ly, lm, ld) = LATEST_DATE;
    if NaiveDate::from_ymd_opt(ey, em, ed).is_some_and(|earliest| date <= earliest) {
        errors.add(field, format!("The {field} field must be a date after 1900-01-01."));
        return None;
    }
    if NaiveDate::from_ymd_opt(ly, lm, ld).is_some_and(|latest| date >= latest) {
        errors.add(field, format!("The {field} field must be a date before 2099-12-31."));
        return None;
    }
    Some(date)
}

fn range_of(
    errors: &mut ValidationErrors,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<DateRange> {
    let (start, end) = (start?, end?);
    match DateRange::from_dates(start, end) {
        Ok(range) => Some(range),
        Err(_) => {
            errors.add("end", "The end field must be a date after or equal to start.");
            None
        }
    }
}

/// Both dates, when both are given, form the period. Each given date is
/// still validated on its own.
fn optional_period(
    errors: &mut ValidationErrors,
    start: Option<&str>,
    end: Option<&str>,
) -> Option<DateRange> {
    let start = start
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|raw| parse_date(errors, "start", raw));
    let end = end
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|raw| parse_date(errors, "end", raw));
    range_of(errors, start, end)
}
