//! Order management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use dala_core::{ApiResponse, Order, OrderId, OrderStatus, Page};

use crate::error::{AppError, Result};
use crate::models::{OrderForm, SaveAction};
use crate::state::AppState;
use crate::supabase::OrderFormWrite;
use crate::supabase::query::OrderFilters;
use crate::validate::{OrderFormPayload, validate_order_form, validate_status};

/// Order listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<OrdersQuery> for OrderFilters {
    fn from(query: OrdersQuery) -> Self {
        Self {
            q: query.q,
            // Unknown status values fall through as "no filter", matching a
            // UI that only ever sends the known set.
            status: query
                .status
                .as_deref()
                .and_then(|s| s.parse::<OrderStatus>().ok()),
            page: query.page,
            limit: query.limit,
        }
    }
}

/// Status update payload.
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// Order listing with search, status filter and pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<ApiResponse<Page<Order>>>> {
    let filters = OrderFilters::from(query);
    let page = state.client().list_orders(&filters).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Rebuild the edit-form state a submission represents.
fn form_from_write(id: Option<OrderId>, write: &OrderFormWrite) -> OrderForm {
    OrderForm {
        id,
        customer_name: write.customer_name.clone().unwrap_or_default(),
        phone: write.phone.clone().unwrap_or_default(),
        total: write.total.unwrap_or_default(),
        status: write.status.unwrap_or_default(),
    }
}

/// Persist a submitted form: create without an `id`, update with one.
async fn save_form(state: &AppState, form: &OrderForm, write: &OrderFormWrite) -> Result<Order> {
    match form.save_action() {
        SaveAction::Create => Ok(state.client().create_order(write).await?),
        SaveAction::Update(id) => Ok(state.client().update_order(&id, write).await?),
    }
}

/// Create an order from the admin form.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderFormPayload>,
) -> Result<Json<ApiResponse<Order>>> {
    let write = validate_order_form(&payload).map_err(AppError::Validation)?;
    let form = form_from_write(None, &write);
    let order = save_form(&state, &form, &write).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Update an existing order's form fields.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<OrderFormPayload>,
) -> Result<Json<ApiResponse<Order>>> {
    let write = validate_order_form(&payload).map_err(AppError::Validation)?;
    let form = form_from_write(Some(id), &write);
    let order = save_form(&state, &form, &write).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Update only an order's status.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<ApiResponse<Order>>> {
    let status = validate_status(&payload.status).map_err(AppError::Validation)?;
    let order = state.client().update_order_status(&id, status).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<ApiResponse<()>>> {
    state.client().delete_order(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_maps_known_status() {
        let query = OrdersQuery {
            q: Some("7701".to_string()),
            status: Some("confirmed".to_string()),
            page: None,
            limit: None,
        };

        let filters = OrderFilters::from(query);
        assert_eq!(filters.status, Some(OrderStatus::Confirmed));
        assert_eq!(filters.q.as_deref(), Some("7701"));
    }

    #[test]
    fn test_save_dispatch_follows_id_presence() {
        let write = OrderFormWrite {
            customer_name: Some("Aigerim".to_string()),
            phone: Some("77012345678".to_string()),
            total: None,
            status: None,
        };

        let create = form_from_write(None, &write);
        assert_eq!(create.save_action(), SaveAction::Create);

        let update = form_from_write(Some(OrderId::new("o1")), &write);
        assert_eq!(
            update.save_action(),
            SaveAction::Update(OrderId::new("o1"))
        );
    }

    #[test]
    fn test_query_drops_unknown_status() {
        let query = OrdersQuery {
            q: None,
            status: Some("shipped".to_string()),
            page: None,
            limit: None,
        };

        let filters = OrderFilters::from(query);
        assert_eq!(filters.status, None);
    }
}
