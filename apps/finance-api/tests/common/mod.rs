//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use finance_api::config::{Config, LocalizationConfig};
use finance_api::{AppState, Container, InMemoryRepositories, SeedData, Translator, create_router};

/// Household 1 owns everything; household 2 is empty.
///
/// January 2024: Groceries has a 400 EUR limit and 150 EUR of spend plus a
/// 30 USD expense, Travel has no limit and 200 USD of spend.
pub const SEED: &str = r#"
user_groups:
  - { id: 1, title: "Household" }
  - { id: 2, title: "Flatmates" }
currencies:
  - { id: 1, code: EUR, name: Euro, symbol: "€", decimal_places: 2, enabled: true }
  - { id: 2, code: USD, name: US Dollar, symbol: "$", decimal_places: 2, enabled: true }
exchange_rates:
  - { from: 2, to: 1, date: 2024-01-01, rate: "0.9" }
budgets:
  - { id: 1, user_group_id: 1, name: Groceries, active: true, order: 1 }
  - { id: 2, user_group_id: 1, name: Travel, active: true, order: 2 }
  - { id: 3, user_group_id: 1, name: Dormant, active: false, order: 3 }
budget_limits:
  - { id: 1, budget_id: 1, currency_id: 1, amount: "400", start_date: 2024-01-01, end_date: 2024-01-31 }
accounts:
  - { id: 1, user_group_id: 1, name: Checking, account_type: asset, account_role: defaultAsset, currency_id: 1, opening_balance: "1000", active: true, order: 1, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
  - { id: 2, user_group_id: 1, name: Savings, account_type: asset, currency_id: 1, opening_balance: "5000", active: true, order: 2, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
  - { id: 3, user_group_id: 1, name: Dollar card, account_type: asset, currency_id: 2, active: true, order: 3, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
  - { id: 4, user_group_id: 1, name: Supermarket, account_type: expense, currency_id: 1, active: true, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
  - { id: 5, user_group_id: 1, name: Airline, account_type: expense, currency_id: 2, active: true, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
  - { id: 6, user_group_id: 1, name: Employer, account_type: revenue, currency_id: 1, active: true, created_at: "2023-12-01T00:00:00Z", updated_at: "2023-12-01T00:00:00Z" }
transactions:
  - { id: 1, user_group_id: 1, transaction_type: deposit, date: "2024-01-02T12:00:00Z", description: Salary, source_id: 6, destination_id: 1, currency_id: 1, amount: "500" }
  - { id: 2, user_group_id: 1, transaction_type: withdrawal, date: "2024-01-05T12:00:00Z", description: Shopping, source_id: 1, destination_id: 4, currency_id: 1, amount: "100", budget_id: 1 }
  - { id: 3, user_group_id: 1, transaction_type: withdrawal, date: "2024-01-20T12:00:00Z", description: Shopping, source_id: 1, destination_id: 4, currency_id: 1, amount: "50", budget_id: 1 }
  - { id: 4, user_group_id: 1, transaction_type: withdrawal, date: "2024-01-10T12:00:00Z", description: Flight, source_id: 3, destination_id: 5, currency_id: 2, amount: "200", budget_id: 2 }
  - { id: 5, user_group_id: 1, transaction_type: withdrawal, date: "2024-01-12T12:00:00Z", description: Market abroad, source_id: 3, destination_id: 5, currency_id: 2, amount: "30", budget_id: 1 }
  - { id: 6, user_group_id: 1, transaction_type: withdrawal, date: "2024-01-15T12:00:00Z", description: Old habit, source_id: 1, destination_id: 4, currency_id: 1, amount: "10", budget_id: 3 }
"#;

/// Router over [`SEED`] with the shipped translation tables.
pub fn app() -> Router {
    let seed = SeedData::from_yaml(SEED).unwrap();
    let config = Config {
        localization: LocalizationConfig {
            locales: vec!["en_US".into(), "sl_SI".into(), "th_TH".into()],
            ..LocalizationConfig::default()
        },
        ..Config::default()
    };
    let translator = Translator::load(&config.localization).unwrap();
    let container = Arc::new(Container::new(InMemoryRepositories::from_seed(seed), &config));
    create_router(AppState::new(container, Arc::new(translator), "test"))
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Decimal value of a JSON amount string.
pub fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}
