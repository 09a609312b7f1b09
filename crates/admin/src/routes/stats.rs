//! Sales statistics handler.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use dala_core::ApiResponse;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stats::{
    SalesRange, StatsPeriod, StatsResponse, build_summary, compute_date_range, group_orders_by_day,
};

/// Stats query parameters.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub period: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Summary, per-day chart, and raw orders for the requested period.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ApiResponse<StatsResponse>>> {
    let period = query
        .period
        .as_deref()
        .map_or_else(StatsPeriod::default, StatsPeriod::from_param);

    let custom = match (query.from, query.to) {
        (Some(from), Some(to)) => Some(SalesRange { from, to }),
        _ => None,
    };

    let range = compute_date_range(period, custom, Utc::now().date_naive())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let orders = state.client().orders_between(range.from, range.to).await?;

    let response = StatsResponse {
        summary: build_summary(&orders),
        chart: group_orders_by_day(&orders),
        orders,
    };

    Ok(Json(ApiResponse::ok(response)))
}
