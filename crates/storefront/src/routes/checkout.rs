//! Checkout route handler.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use dala_core::{ApiResponse, Order};

use crate::cart::{CartStore, SessionCartRepository};
use crate::checkout::{Checkout, DeliveryForm, validate_delivery_form};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Submit the current cart with the delivery form as a new order.
///
/// Validation failures return a field-keyed error map before any backend
/// call; a confirmed order clears the cart in the same request.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<DeliveryForm>,
) -> Result<Json<ApiResponse<Order>>> {
    validate_delivery_form(&form).map_err(AppError::Validation)?;

    let mut cart = CartStore::open(SessionCartRepository::new(session)).await?;
    let mut checkout = Checkout::new(state.orders().clone());

    checkout.submit(&mut cart, &form).await?;

    // submit() resolved without error and without a success only when the
    // empty-cart guard fired.
    checkout.into_success().map_or_else(
        || Err(AppError::BadRequest("Cart is empty".to_string())),
        |order| Ok(Json(ApiResponse::ok(order))),
    )
}
