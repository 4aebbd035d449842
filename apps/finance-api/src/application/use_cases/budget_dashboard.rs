//! Budget Dashboard Use Case
//!
//! Builds the chart rows comparing budget limits with actual spending.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::application::dto::{BudgetChartRowDto, ChartEntriesDto};
use crate::application::errors::ApplicationError;
use crate::application::ports::ActivityPort;
use crate::application::services::{
    CurrencySettings, ExchangeRateConverter, ResponseCache, cache_key,
};
use crate::domain::budgeting::{Budget, BudgetLimit, BudgetRepository, LimitStatus};
use crate::domain::currency::{CurrencyRepository, TransactionCurrency};
use crate::domain::shared::{Amount, BudgetId, CurrencyId, DateRange, UserGroupId};
use crate::domain::transactions::{ExpenseReport, TransactionRepository, group_expenses};
use crate::observability::record_dashboard_build;

/// Cached dashboard responses.
pub type DashboardCache = ResponseCache<Vec<BudgetChartRowDto>>;

/// Spending of one budget in one currency.
struct SpentSummary {
    currency: TransactionCurrency,
    spent: Amount,
    native_spent: Amount,
}

/// Use case computing the budget dashboard chart.
pub struct BudgetDashboardUseCase<B, T, C, A>
where
    B: BudgetRepository,
    T: TransactionRepository,
    C: CurrencyRepository,
    A: ActivityPort,
{
    budgets: Arc<B>,
    transactions: Arc<T>,
    currencies: Arc<C>,
    activity: Arc<A>,
    cache: Arc<DashboardCache>,
    settings: CurrencySettings,
}

impl<B, T, C, A> BudgetDashboardUseCase<B, T, C, A>
where
    B: BudgetRepository,
    T: TransactionRepository,
    C: CurrencyRepository,
    A: ActivityPort,
{
    /// Create a new BudgetDashboardUseCase.
    pub fn new(
        budgets: Arc<B>,
        transactions: Arc<T>,
        currencies: Arc<C>,
        activity: Arc<A>,
        cache: Arc<DashboardCache>,
        settings: CurrencySettings,
    ) -> Self {
        Self {
            budgets,
            transactions,
            currencies,
            activity,
            cache,
            settings,
        }
    }

    /// Execute the use case for a user group and reporting window.
    ///
    /// Rows of all active budgets are returned in one flat list: budgets in
    /// their configured order, and per budget one row per limit, or one row
    /// per currency when the budget has no limits in the window.
    #[tracing::instrument(skip(self), fields(start = %range.start(), end = %range.end()))]
    pub async fn execute(
        &self,
        group: UserGroupId,
        range: DateRange,
    ) -> Result<Vec<BudgetChartRowDto>, ApplicationError> {
        let started = Instant::now();
        let key = cache_key(
            &format!("budget-dashboard-{group}"),
            range.start().date_naive(),
            range.end().date_naive(),
            &self.activity.last_activity(),
        );
        if let Some(rows) = self.cache.get(&key) {
            tracing::debug!(rows = rows.len(), "Serving dashboard from cache");
            record_dashboard_build("hit", rows.len(), started.elapsed().as_secs_f64());
            return Ok(rows);
        }

        let mut converter = self.settings.converter(Arc::clone(&self.currencies));
        let native = converter.native_currency(&self.settings).await?;

        let mut rows = Vec::new();
        for budget in self.budgets.active_budgets(group).await? {
            rows.extend(
                self.process_budget(&mut converter, group, &budget, &range, &native)
                    .await?,
            );
        }

        tracing::info!(rows = rows.len(), "Budget dashboard computed");
        record_dashboard_build("miss", rows.len(), started.elapsed().as_secs_f64());
        self.cache.insert(key, rows.clone());
        Ok(rows)
    }

    async fn process_budget(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        group: UserGroupId,
        budget: &Budget,
        range: &DateRange,
        native: &TransactionCurrency,
    ) -> Result<Vec<BudgetChartRowDto>, ApplicationError> {
        let limits = self.budgets.limits_in_range(budget.id, range).await?;
        if limits.is_empty() {
            return self
                .without_limits(converter, group, budget, range, native)
                .await;
        }
        let mut rows = Vec::new();
        for limit in &limits {
            if let Some(row) = self
                .for_limit(converter, group, budget, limit, native)
                .await?
            {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// One row per currency with spending only.
    async fn without_limits(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        group: UserGroupId,
        budget: &Budget,
        range: &DateRange,
        native: &TransactionCurrency,
    ) -> Result<Vec<BudgetChartRowDto>, ApplicationError> {
        let report = self.expenses(group, budget.id, range).await?;
        let summaries = summarize(converter, budget.id, &report, native).await?;
        Ok(summaries
            .into_values()
            .map(|summary| {
                BudgetChartRowDto::new(
                    &budget.name,
                    &summary.currency,
                    native,
                    range,
                    ChartEntriesDto::spent_only(summary.spent),
                    ChartEntriesDto::spent_only(summary.native_spent),
                )
            })
            .collect())
    }

    /// The row of a single limit, counting only expenses in its currency.
    ///
    /// A limit without matching expenses yields no row.
    async fn for_limit(
        &self,
        converter: &mut ExchangeRateConverter<C>,
        group: UserGroupId,
        budget: &Budget,
        limit: &BudgetLimit,
        native: &TransactionCurrency,
    ) -> Result<Option<BudgetChartRowDto>, ApplicationError> {
        let window = limit.window()?;
        let mut report = self.expenses(group, budget.id, &window).await?;
        report.retain(|currency_id, _| *currency_id == limit.currency_id);

        let mut summaries = summarize(converter, budget.id, &report, native).await?;
        let Some(summary) = summaries.remove(&limit.currency_id) else {
            tracing::debug!(limit_id = %limit.id, "No matching expenses for limit");
            return Ok(None);
        };

        let native_limit = converter
            .convert(limit.amount, &summary.currency, native, limit.start_date)
            .await?;
        let status = LimitStatus::evaluate(limit.amount, summary.spent);
        let outcome = status.outcome(limit.amount, summary.spent);
        let native_outcome = status.outcome(native_limit, summary.native_spent);

        Ok(Some(BudgetChartRowDto::new(
            &budget.name,
            &summary.currency,
            native,
            &window,
            ChartEntriesDto {
                spent: summary.spent,
                left: outcome.left,
                overspent: outcome.overspent,
            },
            ChartEntriesDto {
                spent: summary.native_spent,
                left: native_outcome.left,
                overspent: native_outcome.overspent,
            },
        )))
    }

    async fn expenses(
        &self,
        group: UserGroupId,
        budget: BudgetId,
        range: &DateRange,
    ) -> Result<ExpenseReport, ApplicationError> {
        let journals = self
            .transactions
            .expenses_in_range(group, range, &[budget])
            .await?;
        Ok(group_expenses(&journals))
    }
}

/// Sum a budget's expenses per currency, converting each to native.
///
/// An expense whose foreign currency is the native currency contributes its
/// foreign amount instead of a converted one.
async fn summarize<C: CurrencyRepository>(
    converter: &mut ExchangeRateConverter<C>,
    budget: BudgetId,
    report: &ExpenseReport,
    native: &TransactionCurrency,
) -> Result<BTreeMap<CurrencyId, SpentSummary>, ApplicationError> {
    let mut summaries = BTreeMap::new();
    for (currency_id, group) in report {
        let journals = group.journals_for(budget);
        if journals.is_empty() {
            continue;
        }
        let currency = converter.currency(*currency_id).await?;
        let mut spent = Amount::ZERO;
        let mut native_spent = Amount::ZERO;
        for journal in journals {
            spent += journal.amount;
            native_spent += match (journal.foreign_currency_id, journal.foreign_amount) {
                (Some(foreign), Some(amount)) if foreign == native.id => amount,
                _ => {
                    converter
                        .convert(journal.amount, &currency, native, journal.date.date_naive())
                        .await?
                }
            };
        }
        summaries.insert(
            *currency_id,
            SpentSummary {
                currency,
                spent,
                native_spent,
            },
        );
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::InMemoryActivityTracker;
    use crate::application::use_cases::test_support::{
        EUR, GROUP, USD, add_budget, add_limit, at, date, journal, repositories,
    };
    use crate::domain::currency::{ExchangeRate, ExchangeRateError};
    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;
    use crate::infrastructure::persistence::{
        InMemoryBudgetRepository, InMemoryCurrencyRepository, InMemoryRepositories,
        InMemoryTransactionRepository,
    };
    use rust_decimal_macros::dec;
    use std::time::Duration;

    type UseCase = BudgetDashboardUseCase<
        InMemoryBudgetRepository,
        InMemoryTransactionRepository,
        InMemoryCurrencyRepository,
        InMemoryActivityTracker,
    >;

    fn use_case(
        repos: &InMemoryRepositories,
        native: &str,
    ) -> (UseCase, Arc<InMemoryActivityTracker>) {
        let activity = Arc::new(InMemoryActivityTracker::new());
        let use_case = BudgetDashboardUseCase::new(
            Arc::clone(&repos.budgets),
            Arc::clone(&repos.transactions),
            Arc::clone(&repos.currencies),
            Arc::clone(&activity),
            Arc::new(DashboardCache::new(Duration::from_secs(60))),
            CurrencySettings::new(native),
        );
        (use_case, activity)
    }

    fn january() -> DateRange {
        DateRange::from_dates(date(1, 1), date(1, 31)).unwrap()
    }

    #[tokio::test]
    async fn no_limits_yields_spent_per_currency() {
        let repos = repositories();
        add_budget(&repos, 1, "Groceries", 0);
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), at(1, 5)));
        repos.transactions.add(journal(2, Some(1), EUR, dec!(5.50), at(1, 6)));
        repos.transactions.add(journal(3, Some(1), USD, dec!(20), at(1, 7)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();

        assert_eq!(rows.len(), 2);
        let eur = &rows[0];
        assert_eq!(eur.label, "Groceries");
        assert_eq!(eur.currency_code, "EUR");
        assert_eq!(eur.entries.spent.value(), dec!(-15.50));
        assert_eq!(eur.entries.left, Amount::ZERO);
        assert_eq!(eur.entries.overspent, Amount::ZERO);
        assert_eq!(eur.native_entries.spent.value(), dec!(-15.50));
        assert_eq!(eur.start, "2024-01-01T00:00:00+00:00");
        assert_eq!(eur.end, "2024-01-31T23:59:59+00:00");

        let usd = &rows[1];
        assert_eq!(usd.currency_code, "USD");
        assert_eq!(usd.entries.spent.value(), dec!(-20));
        assert_eq!(usd.native_entries.spent.value(), dec!(-18.0));
        assert_eq!(usd.native_code, "EUR");
    }

    #[tokio::test]
    async fn spending_below_limit_leaves_remainder() {
        let repos = repositories();
        add_budget(&repos, 1, "Groceries", 0);
        add_limit(&repos, 1, 1, USD, dec!(100), (date(1, 1), date(1, 31)));
        repos.transactions.add(journal(1, Some(1), USD, dec!(40), at(1, 5)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.entries.spent.value(), dec!(-40));
        assert_eq!(row.entries.left.value(), dec!(60));
        assert_eq!(row.entries.overspent, Amount::ZERO);
        // Limit 100 USD at 0.9 = 90 EUR, spent -36 EUR.
        assert_eq!(row.native_entries.spent.value(), dec!(-36.0));
        assert_eq!(row.native_entries.left.value(), dec!(54.0));
        assert_eq!(row.native_entries.overspent, Amount::ZERO);
    }

    #[tokio::test]
    async fn spending_above_limit_is_overspent() {
        let repos = repositories();
        add_budget(&repos, 1, "Fun", 0);
        add_limit(&repos, 1, 1, EUR, dec!(50), (date(1, 1), date(1, 31)));
        repos.transactions.add(journal(1, Some(1), EUR, dec!(80), at(1, 5)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();

        let row = &rows[0];
        assert_eq!(row.entries.left, Amount::ZERO);
        assert_eq!(row.entries.overspent.value(), dec!(30));
        assert_eq!(row.native_entries.overspent.value(), dec!(30));
    }

    #[tokio::test]
    async fn native_limit_uses_rate_at_limit_start() {
        let repos = repositories();
        repos.currencies.add_rate(ExchangeRate {
            from: USD,
            to: EUR,
            date: date(1, 10),
            rate: dec!(0.8),
        });
        add_budget(&repos, 1, "Holiday", 0);
        add_budget(&repos, 2, "Gadgets", 1);
        add_limit(&repos, 1, 1, USD, dec!(100), (date(1, 1), date(1, 31)));
        add_limit(&repos, 2, 2, USD, dec!(100), (date(1, 1), date(1, 31)));
        repos.transactions.add(journal(1, Some(1), USD, dec!(40), at(1, 15)));
        repos.transactions.add(journal(2, Some(2), USD, dec!(130), at(1, 15)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(rows.len(), 2);

        // Limit 100 USD at the Jan 1 rate (0.9) = 90 EUR; spend at the Jan 15 rate (0.8).
        let holiday = &rows[0];
        assert_eq!(holiday.native_entries.spent.value(), dec!(-32.0));
        assert_eq!(holiday.native_entries.left.value(), dec!(58.0));
        assert_eq!(holiday.native_entries.overspent, Amount::ZERO);

        let gadgets = &rows[1];
        assert_eq!(gadgets.entries.overspent.value(), dec!(30));
        assert_eq!(gadgets.native_entries.spent.value(), dec!(-104.0));
        assert_eq!(gadgets.native_entries.left, Amount::ZERO);
        assert_eq!(gadgets.native_entries.overspent.value(), dec!(14.0));
    }

    #[tokio::test]
    async fn newer_zero_rate_does_not_hide_older_rate() {
        let repos = repositories();
        repos.currencies.add_rate(ExchangeRate {
            from: USD,
            to: EUR,
            date: date(1, 10),
            rate: Decimal::ZERO,
        });
        add_budget(&repos, 1, "Travel", 0);
        repos.transactions.add(journal(1, Some(1), USD, dec!(10), at(1, 15)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(rows[0].native_entries.spent.value(), dec!(-9.0));
    }

    #[tokio::test]
    async fn expense_late_on_last_limit_day_counts() {
        let repos = repositories();
        add_budget(&repos, 1, "Groceries", 0);
        add_limit(&repos, 1, 1, EUR, dec!(100), (date(1, 1), date(1, 31)));
        let last_moment =
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap() + TimeDelta::milliseconds(500);
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), last_moment));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entries.spent.value(), dec!(-10));
        assert_eq!(rows[0].end, "2024-01-31T23:59:59+00:00");
    }

    #[tokio::test]
    async fn other_currencies_do_not_count_toward_limit() {
        let repos = repositories();
        add_budget(&repos, 1, "Travel", 0);
        add_limit(&repos, 1, 1, EUR, dec!(100), (date(1, 1), date(1, 31)));
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), at(1, 5)));
        repos.transactions.add(journal(2, Some(1), USD, dec!(500), at(1, 6)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].currency_code, "EUR");
        assert_eq!(rows[0].entries.spent.value(), dec!(-10));
        assert_eq!(rows[0].entries.left.value(), dec!(90));
    }

    #[tokio::test]
    async fn limit_without_matching_expenses_has_no_row() {
        let repos = repositories();
        add_budget(&repos, 1, "Travel", 0);
        add_limit(&repos, 1, 1, EUR, dec!(100), (date(1, 1), date(1, 31)));
        repos.transactions.add(journal(1, Some(1), USD, dec!(10), at(1, 5)));

        let (use_case, _) = use_case(&repos, "EUR");
        assert!(use_case.execute(GROUP, january()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn each_limit_uses_its_own_window() {
        let repos = repositories();
        add_budget(&repos, 1, "Groceries", 0);
        add_limit(&repos, 1, 1, EUR, dec!(100), (date(1, 1), date(1, 15)));
        add_limit(&repos, 2, 1, EUR, dec!(100), (date(1, 16), date(2, 15)));
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), at(1, 5)));
        repos.transactions.add(journal(2, Some(1), EUR, dec!(20), at(2, 10)));

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].end, "2024-01-15T23:59:59+00:00");
        assert_eq!(rows[0].entries.spent.value(), dec!(-10));
        assert_eq!(rows[1].start, "2024-01-16T00:00:00+00:00");
        assert_eq!(rows[1].entries.spent.value(), dec!(-20));
    }

    #[tokio::test]
    async fn foreign_amount_in_native_currency_is_used() {
        let repos = repositories();
        add_budget(&repos, 1, "Travel", 0);
        let mut paid = journal(1, Some(1), USD, dec!(10), at(1, 5));
        paid.foreign_currency_id = Some(EUR);
        paid.foreign_amount = Some(Amount::new(dec!(9.37)));
        repos.transactions.add(paid);

        let (use_case, _) = use_case(&repos, "EUR");
        let rows = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(rows[0].native_entries.spent.value(), dec!(-9.37));
    }

    #[tokio::test]
    async fn budgets_in_configured_order() {
        let repos = repositories();
        add_budget(&repos, 1, "Zoo", 0);
        add_budget(&repos, 2, "Apples", 1);
        repos.transactions.add(journal(1, Some(1), EUR, dec!(1), at(1, 5)));
        repos.transactions.add(journal(2, Some(2), EUR, dec!(1), at(1, 5)));

        let (use_case, _) = use_case(&repos, "EUR");
        let labels: Vec<String> = use_case
            .execute(GROUP, january())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, ["Zoo", "Apples"]);
    }

    #[tokio::test]
    async fn missing_rate_fails_the_request() {
        let repos = repositories();
        add_budget(&repos, 1, "Travel", 0);
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), at(1, 5)));

        // Native USD with no stored rates and no fallback for the EUR bridge leg.
        let bare = InMemoryRepositories::new();
        bare.currencies
            .add_currency(TransactionCurrency::new(EUR, "EUR", "Euro", "€", 2).unwrap());
        bare.currencies
            .add_currency(TransactionCurrency::new(USD, "USD", "US Dollar", "$", 2).unwrap());
        let use_case = BudgetDashboardUseCase::new(
            Arc::clone(&repos.budgets),
            Arc::clone(&repos.transactions),
            Arc::clone(&bare.currencies),
            Arc::new(InMemoryActivityTracker::new()),
            Arc::new(DashboardCache::default()),
            CurrencySettings::new("USD"),
        );
        let err = use_case.execute(GROUP, january()).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::ExchangeRate(ExchangeRateError::NoRate { .. })
        ));
    }

    #[tokio::test]
    async fn cached_until_activity_changes() {
        let repos = repositories();
        add_budget(&repos, 1, "Groceries", 0);
        repos.transactions.add(journal(1, Some(1), EUR, dec!(10), at(1, 5)));

        let (use_case, activity) = use_case(&repos, "EUR");
        let first = use_case.execute(GROUP, january()).await.unwrap();

        repos.transactions.add(journal(2, Some(1), EUR, dec!(10), at(1, 6)));
        let cached = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(first, cached);

        activity.touch();
        let fresh = use_case.execute(GROUP, january()).await.unwrap();
        assert_eq!(fresh[0].entries.spent.value(), dec!(-20));
    }

    #[tokio::test]
    async fn unknown_native_currency_is_an_error() {
        let repos = repositories();
        let (use_case, _) = use_case(&repos, "CHF");
        assert!(matches!(
            use_case.execute(GROUP, january()).await,
            Err(ApplicationError::Currency(_))
        ));
    }
}
