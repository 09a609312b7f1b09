//! Public order lookup handler.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use dala_core::{ApiResponse, Order, OrderId};

use crate::error::Result;
use crate::state::AppState;

/// Fetch a single order (e.g., the confirmation view after checkout).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<ApiResponse<Order>>> {
    let order = state.orders().get_order(&id).await?;
    Ok(Json(ApiResponse::ok(order)))
}
