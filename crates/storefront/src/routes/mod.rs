//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (session store)
//!
//! # Catalog
//! GET    /api/products                 - Product listing (q/category/price/page)
//! GET    /api/products/{id}            - Product detail
//!
//! # Cart
//! GET    /api/cart                     - Current cart view
//! POST   /api/cart/items               - Add a line (merges by product ID)
//! POST   /api/cart/items/{id}/increment - Bump a line's quantity
//! POST   /api/cart/items/{id}/decrement - Lower a line's quantity (floor 1)
//! DELETE /api/cart/items/{id}          - Remove a line
//! DELETE /api/cart                     - Clear the cart
//!
//! # Checkout
//! POST   /api/checkout                 - Submit the cart as an order
//! GET    /api/orders/{id}              - Order confirmation lookup
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", delete(cart::remove))
        .route("/items/{id}/increment", post(cart::increment))
        .route("/items/{id}/decrement", post(cart::decrement))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/api/products", get(catalog::list))
        .route("/api/products/{id}", get(catalog::show))
        // Cart
        .nest("/api/cart", cart_routes())
        // Checkout
        .route("/api/checkout", post(checkout::submit))
        .route("/api/orders/{id}", get(orders::show))
}
