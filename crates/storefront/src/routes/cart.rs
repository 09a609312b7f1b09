//! Cart route handlers.
//!
//! Every mutation responds with the updated cart view so the client can
//! re-render without a follow-up fetch. The cart itself lives in the
//! visitor's session; handlers construct a [`CartStore`] per request.

use axum::{Json, extract::Path};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use dala_core::{ApiResponse, ProductId, format_kzt};

use crate::cart::{Cart, CartLine, CartStore, SessionCartRepository};
use crate::error::{AppError, Result};

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub total_display: String,
    pub count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.clone(),
            total: cart.total(),
            total_display: format_kzt(cart.total()),
            count: cart.count(),
        }
    }
}

/// Add to cart payload.
#[derive(Debug, Deserialize)]
pub struct AddToCartPayload {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

const fn default_qty() -> u32 {
    1
}

/// Open the session-backed cart store for this request.
async fn open_cart(session: Session) -> Result<CartStore<SessionCartRepository>> {
    Ok(CartStore::open(SessionCartRepository::new(session)).await?)
}

/// Current cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<ApiResponse<CartView>>> {
    let store = open_cart(session).await?;
    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

/// Add a line to the cart, merging by product ID.
#[instrument(skip(session, payload), fields(id = %payload.id))]
pub async fn add(
    session: Session,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<ApiResponse<CartView>>> {
    if payload.qty == 0 {
        return Err(AppError::BadRequest("qty must be at least 1".to_string()));
    }
    if payload.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }

    let mut store = open_cart(session).await?;
    store
        .add(CartLine {
            id: payload.id,
            name: payload.name,
            price: payload.price,
            image: payload.image,
            qty: payload.qty,
        })
        .await?;

    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

/// Remove a line from the cart. No-op for an unknown ID.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = open_cart(session).await?;
    store.remove(&id).await?;
    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

/// Increment a line's quantity. No-op for an unknown ID.
#[instrument(skip(session))]
pub async fn increment(
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = open_cart(session).await?;
    store.increment(&id).await?;
    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

/// Decrement a line's quantity, floored at one. No-op for an unknown ID.
#[instrument(skip(session))]
pub async fn decrement(
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = open_cart(session).await?;
    store.decrement(&id).await?;
    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = open_cart(session).await?;
    store.clear().await?;
    Ok(Json(ApiResponse::ok(CartView::from(store.cart()))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_cart_view_formats_total() {
        let mut cart = Cart::default();
        cart.add(CartLine {
            id: ProductId::new("p1"),
            name: "Futbolka".to_string(),
            price: Decimal::from(4990),
            image: String::new(),
            qty: 2,
        });

        let view = CartView::from(&cart);
        assert_eq!(view.total, Decimal::from(9980));
        assert_eq!(view.total_display, "9 980 ₸");
        assert_eq!(view.count, 2);
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::default());
        assert_eq!(view.total, Decimal::from(0));
        assert_eq!(view.total_display, "0 ₸");
        assert_eq!(view.count, 0);
    }

    #[test]
    fn test_add_payload_defaults() {
        let payload: AddToCartPayload =
            serde_json::from_str(r#"{"id":"p1","name":"Futbolka","price":100}"#).unwrap();
        assert_eq!(payload.qty, 1);
        assert_eq!(payload.image, "");
    }
}
