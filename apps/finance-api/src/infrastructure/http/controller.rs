//! HTTP Controller (Driver Adapter)
//!
//! Axum-based JSON API that delegates to application use cases.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{MatchedPath, Path, Query, Request, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;

use crate::application::ApplicationError;
use crate::application::dto::{
    AccountColumnsDto, AccountListDto, AccountSingleDto, BudgetChartRowDto, CreatePreferenceDto,
    PreferenceSingleDto, UpdatePreferenceDto,
};
use crate::domain::accounts::{AccountError, AccountTypeFilter, AccountUpdate};
use crate::domain::shared::{AccountId, UserGroupId};
use crate::infrastructure::config::{
    AccountColumnsUseCaseFor, Container, DashboardUseCaseFor, ListAccountsUseCaseFor,
    ManagePreferencesUseCaseFor, Repositories, UpdateAccountUseCaseFor,
};
use crate::infrastructure::i18n::Translator;
use crate::observability::{get_metrics_handle, record_http_request};

use super::request::{AccountListRequest, AccountShowRequest, DateRequest, UserGroupRequest};
use super::response::{ApiError, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<R: Repositories> {
    /// Wiring and shared request state.
    pub container: Arc<Container<R>>,
    /// Use case for the budget chart.
    pub budget_dashboard: Arc<DashboardUseCaseFor<R>>,
    /// Use case for listing and showing accounts.
    pub list_accounts: Arc<ListAccountsUseCaseFor<R>>,
    /// Use case for editing accounts.
    pub update_account: Arc<UpdateAccountUseCaseFor<R>>,
    /// Use case for grid column settings.
    pub account_columns: Arc<AccountColumnsUseCaseFor<R>>,
    /// Use case for preferences.
    pub preferences: Arc<ManagePreferencesUseCaseFor<R>>,
    /// Translation tables.
    pub translator: Arc<Translator>,
    /// Application version.
    pub version: String,
}

impl<R: Repositories> AppState<R> {
    /// Build every use case from the container.
    pub fn new(
        container: Arc<Container<R>>,
        translator: Arc<Translator>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            budget_dashboard: Arc::new(container.budget_dashboard_use_case()),
            list_accounts: Arc::new(container.list_accounts_use_case()),
            update_account: Arc::new(container.update_account_use_case()),
            account_columns: Arc::new(container.account_columns_use_case()),
            preferences: Arc::new(container.manage_preferences_use_case()),
            container,
            translator,
            version: version.into(),
        }
    }

    async fn user_group(&self, requested: Option<UserGroupId>) -> Result<UserGroupId, ApiError> {
        Ok(self.container.resolve_user_group(requested).await?)
    }

    /// Locale named by `Accept-Language`, when it is served.
    fn locale(&self, headers: &HeaderMap) -> String {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .into_iter()
            .flat_map(|value| value.split(','))
            .filter_map(|tag| tag.split(';').next())
            .map(|tag| tag.trim().replace('-', "_"))
            .find(|tag| self.translator.supports(tag))
            .unwrap_or_else(|| self.translator.default_locale().to_string())
    }

    /// Map an application error, translating messages that have a
    /// translation key.
    fn localized(&self, locale: &str, error: ApplicationError) -> ApiError {
        match error {
            ApplicationError::Account(AccountError::NameTaken { name, account_type }) => {
                ApiError::validation(
                    "name",
                    self.translator.translate(
                        locale,
                        "firefly.account_name_taken",
                        &[("name", name.as_str()), ("type", account_type.as_str())],
                    ),
                )
            }
            other => other.into(),
        }
    }
}

impl<R: Repositories> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            container: Arc::clone(&self.container),
            budget_dashboard: Arc::clone(&self.budget_dashboard),
            list_accounts: Arc::clone(&self.list_accounts),
            update_account: Arc::clone(&self.update_account),
            account_columns: Arc::clone(&self.account_columns),
            preferences: Arc::clone(&self.preferences),
            translator: Arc::clone(&self.translator),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<R: Repositories>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/v2/chart/budget/dashboard", get(budget_dashboard))
        .route("/api/v2/accounts", get(list_accounts))
        .route(
            "/api/v2/accounts/columns/{type}",
            get(get_account_columns).put(put_account_columns),
        )
        .route("/api/v2/accounts/{id}", get(show_account).put(update_account))
        .route("/api/v2/preferences", post(create_preference))
        .route(
            "/api/v2/preferences/{name}",
            get(get_preference).put(put_preference),
        )
        .route("/api/v2/i18n/{locale}", get(translations))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Record route, status and latency of every request.
async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |path| path.as_str().to_string());
    let started = Instant::now();
    let response = next.run(request).await;
    record_http_request(
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

/// Health check endpoint.
async fn health_check<R: Repositories>(State(state): State<AppState<R>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

/// Budget chart: spent, left and overspent per budget and currency.
async fn budget_dashboard<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(request): Query<DateRequest>,
) -> Result<Json<Vec<BudgetChartRowDto>>, ApiError> {
    let range = request.date_range()?;
    let group = state.user_group(request.user_group()?).await?;
    let rows = state.budget_dashboard.execute(group, range).await?;
    Ok(Json(rows))
}

async fn list_accounts<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(request): Query<AccountListRequest>,
) -> Result<Json<AccountListDto>, ApiError> {
    let query = request.to_query()?;
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.list_accounts.list(group, query).await?))
}

async fn show_account<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Query(request): Query<AccountShowRequest>,
) -> Result<Json<AccountSingleDto>, ApiError> {
    let id = account_id(&id)?;
    let period = request.period()?;
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.list_accounts.show(group, id, period).await?))
}

async fn update_account<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Query(request): Query<UserGroupRequest>,
    headers: HeaderMap,
    body: Result<Json<AccountUpdate>, JsonRejection>,
) -> Result<Json<AccountSingleDto>, ApiError> {
    let id = account_id(&id)?;
    let Json(update) = body.map_err(body_error)?;
    let group = state.user_group(request.user_group()?).await?;
    let locale = state.locale(&headers);

    state
        .update_account
        .execute(group, id, update)
        .await
        .map_err(|e| state.localized(&locale, e))?;
    Ok(Json(state.list_accounts.show(group, id, None).await?))
}

async fn get_account_columns<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(account_type): Path<String>,
    Query(request): Query<UserGroupRequest>,
) -> Result<Json<AccountColumnsDto>, ApiError> {
    let filter = account_type.parse::<AccountTypeFilter>().map_err(ApplicationError::from)?;
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.account_columns.get(group, filter).await?))
}

async fn put_account_columns<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(account_type): Path<String>,
    Query(request): Query<UserGroupRequest>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AccountColumnsDto>, ApiError> {
    let filter = account_type.parse::<AccountTypeFilter>().map_err(ApplicationError::from)?;
    let Json(body) = body.map_err(body_error)?;
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.account_columns.put(group, filter, &body).await?))
}

async fn get_preference<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(name): Path<String>,
    Query(request): Query<UserGroupRequest>,
) -> Result<Json<PreferenceSingleDto>, ApiError> {
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.preferences.get(group, &name).await?))
}

async fn create_preference<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(request): Query<UserGroupRequest>,
    body: Result<Json<CreatePreferenceDto>, JsonRejection>,
) -> Result<(StatusCode, Json<PreferenceSingleDto>), ApiError> {
    let Json(body) = body.map_err(body_error)?;
    let group = state.user_group(request.user_group()?).await?;
    let created = state.preferences.create(group, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn put_preference<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(name): Path<String>,
    Query(request): Query<UserGroupRequest>,
    body: Result<Json<UpdatePreferenceDto>, JsonRejection>,
) -> Result<Json<PreferenceSingleDto>, ApiError> {
    let Json(body) = body.map_err(body_error)?;
    let group = state.user_group(request.user_group()?).await?;
    Ok(Json(state.preferences.put(group, &name, body.data).await?))
}

/// All translation groups of a locale.
async fn translations<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(locale): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.translator.all_groups(&locale)?))
}

/// Unparseable IDs address nothing.
fn account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Account not found: {raw}")))
}

fn body_error(rejection: JsonRejection) -> ApiError {
    ApiError::validation("body", rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::UserGroup;
    use crate::config::Config;
    use crate::domain::currency::TransactionCurrency;
    use crate::domain::shared::CurrencyId;
    use crate::infrastructure::persistence::InMemoryRepositories;
    use axum::body::Body;
    use axum::http::Request;
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn create_test_state() -> AppState<InMemoryRepositories> {
        let repos = InMemoryRepositories::new();
        repos.user_groups.add(UserGroup {
            id: UserGroupId::new(1),
            title: "Household".to_string(),
        });
        repos.currencies.add_currency(
            TransactionCurrency::new(CurrencyId::new(1), "EUR", "Euro", "€", 2).unwrap(),
        );
        let container = Arc::new(Container::new(repos, &Config::default()));
        let translator = Arc::new(Translator::new(HashMap::new(), "en_US", "en_US"));
        AppState::new(container, translator, "1.0.0-test")
    }

    async fn send(state: AppState<InMemoryRepositories>, uri: &str) -> Response {
        create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let response = send(create_test_state(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.version, "1.0.0-test");
    }

    #[tokio::test]
    async fn dashboard_without_budgets_is_empty() {
        let response = send(
            create_test_state(),
            "/api/v2/chart/budget/dashboard?start=2024-01-01&end=2024-01-31",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"[]");
    }

    #[tokio::test]
    async fn unknown_user_group_is_not_found() {
        let response = send(
            create_test_state(),
            "/api/v2/chart/budget/dashboard?start=2024-01-01&end=2024-01-31&user_group_id=5",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_account_id_is_not_found() {
        let response = send(create_test_state(), "/api/v2/accounts/abc").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_column_type_is_rejected() {
        let response = send(create_test_state(), "/api/v2/accounts/columns/planet").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn locale_follows_accept_language() {
        let mut tables = HashMap::new();
        tables.insert("en_US".to_string(), Default::default());
        tables.insert("sl_SI".to_string(), Default::default());
        let mut state = create_test_state();
        state.translator = Arc::new(Translator::new(tables, "en_US", "en_US"));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, "de-DE, sl-SI;q=0.8".parse().unwrap());
        assert_eq!(state.locale(&headers), "sl_SI");
        assert_eq!(state.locale(&HeaderMap::new()), "en_US");
    }
}
