//! Sales statistics.
//!
//! Pure reductions over orders fetched for a date range: a revenue/volume
//! summary and a per-day chart series. The range resolution takes `today`
//! as a parameter so it stays deterministic under test.

use std::collections::BTreeMap;

use chrono::{Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use dala_core::Order;

/// Reporting period for the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
    Custom,
}

impl StatsPeriod {
    /// Parse from the query-string value; unknown values fall back to the
    /// default period.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s {
            "day" => Self::Day,
            "week" => Self::Week,
            "year" => Self::Year,
            "custom" => Self::Custom,
            _ => Self::Month,
        }
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Errors resolving a stats request to a date range.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// `period=custom` requires both `from` and `to`.
    #[error("custom period requires from and to dates")]
    MissingCustomRange,
}

/// Resolve a period to a concrete date range ending at `today`.
///
/// # Errors
///
/// Returns [`StatsError::MissingCustomRange`] for `Custom` without a range.
pub fn compute_date_range(
    period: StatsPeriod,
    custom: Option<SalesRange>,
    today: NaiveDate,
) -> Result<SalesRange, StatsError> {
    let from = match period {
        StatsPeriod::Day => today,
        StatsPeriod::Week => today.checked_sub_days(Days::new(7)).unwrap_or(today),
        StatsPeriod::Month => today.checked_sub_months(Months::new(1)).unwrap_or(today),
        StatsPeriod::Year => today.checked_sub_months(Months::new(12)).unwrap_or(today),
        StatsPeriod::Custom => return custom.ok_or(StatsError::MissingCustomRange),
    };

    Ok(SalesRange { from, to: today })
}

/// Revenue and order count for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub total: Decimal,
    pub orders: u64,
}

/// Aggregate numbers for the whole range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    /// Average order value, rounded to the whole unit.
    pub average_check: Decimal,
}

/// The full stats payload: summary, chart series, and the raw orders.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub summary: StatsSummary,
    pub chart: Vec<SalesPoint>,
    pub orders: Vec<Order>,
}

/// Group orders by their creation day, ascending by date.
///
/// Orders without a creation timestamp carry no date to group under and are
/// skipped.
#[must_use]
pub fn group_orders_by_day(orders: &[Order]) -> Vec<SalesPoint> {
    let mut days: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();

    for order in orders {
        let Some(created_at) = order.created_at else {
            continue;
        };
        let entry = days.entry(created_at.date_naive()).or_default();
        entry.0 += order.total;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (total, orders))| SalesPoint {
            date,
            total,
            orders,
        })
        .collect()
}

/// Total revenue, order count, and rounded average check.
#[must_use]
pub fn build_summary(orders: &[Order]) -> StatsSummary {
    let total_orders = orders.len() as u64;
    let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();

    let average_check = if total_orders == 0 {
        Decimal::ZERO
    } else {
        (total_revenue / Decimal::from(total_orders))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    };

    StatsSummary {
        total_revenue,
        total_orders,
        average_check,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use dala_core::{OrderId, OrderStatus};
    use rust_decimal::Decimal;

    fn order(total: Decimal, created_at: Option<&str>) -> Order {
        Order {
            id: OrderId::new("o"),
            customer_name: String::new(),
            phone: String::new(),
            address: String::new(),
            delivery_method: String::new(),
            payment_method: String::new(),
            items: Vec::new(),
            total,
            status: OrderStatus::Pending,
            created_at: created_at
                .map(|s| s.parse::<DateTime<Utc>>().unwrap()),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_compute_date_range_day() {
        let range = compute_date_range(StatsPeriod::Day, None, date("2025-11-03")).unwrap();
        assert_eq!(range.from, date("2025-11-03"));
        assert_eq!(range.to, date("2025-11-03"));
    }

    #[test]
    fn test_compute_date_range_week_and_month() {
        let today = date("2025-11-03");

        let week = compute_date_range(StatsPeriod::Week, None, today).unwrap();
        assert_eq!(week.from, date("2025-10-27"));

        let month = compute_date_range(StatsPeriod::Month, None, today).unwrap();
        assert_eq!(month.from, date("2025-10-03"));

        let year = compute_date_range(StatsPeriod::Year, None, today).unwrap();
        assert_eq!(year.from, date("2024-11-03"));
    }

    #[test]
    fn test_compute_date_range_custom() {
        let custom = SalesRange {
            from: date("2025-01-01"),
            to: date("2025-01-31"),
        };
        let range =
            compute_date_range(StatsPeriod::Custom, Some(custom), date("2025-11-03")).unwrap();
        assert_eq!(range, custom);

        assert!(matches!(
            compute_date_range(StatsPeriod::Custom, None, date("2025-11-03")),
            Err(StatsError::MissingCustomRange)
        ));
    }

    #[test]
    fn test_group_orders_by_day_sorted_ascending() {
        let orders = vec![
            order(Decimal::from(100), Some("2025-11-02T15:30:00Z")),
            order(Decimal::from(250), Some("2025-11-01T09:00:00Z")),
            order(Decimal::from(50), Some("2025-11-02T18:00:00Z")),
            order(Decimal::from(75), None), // no timestamp, skipped
        ];

        let chart = group_orders_by_day(&orders);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].date, date("2025-11-01"));
        assert_eq!(chart[0].total, Decimal::from(250));
        assert_eq!(chart[0].orders, 1);
        assert_eq!(chart[1].date, date("2025-11-02"));
        assert_eq!(chart[1].total, Decimal::from(150));
        assert_eq!(chart[1].orders, 2);
    }

    #[test]
    fn test_build_summary() {
        let orders = vec![
            order(Decimal::from(100), None),
            order(Decimal::from(201), None),
        ];

        let summary = build_summary(&orders);
        assert_eq!(summary.total_revenue, Decimal::from(301));
        assert_eq!(summary.total_orders, 2);
        // 150.5 rounds away from zero to 151
        assert_eq!(summary.average_check, Decimal::from(151));
    }

    #[test]
    fn test_build_summary_empty() {
        let summary = build_summary(&[]);
        assert_eq!(summary.total_revenue, Decimal::from(0));
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_check, Decimal::from(0));
    }

    #[test]
    fn test_period_from_param_defaults_to_month() {
        assert_eq!(StatsPeriod::from_param("week"), StatsPeriod::Week);
        assert_eq!(StatsPeriod::from_param("bogus"), StatsPeriod::Month);
    }
}
