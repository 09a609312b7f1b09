//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (backend reachability)
//!
//! # Products
//! GET    /api/products             - Product listing (q/page/limit)
//! POST   /api/products             - Create (multipart: fields + image files)
//! PUT    /api/products/stock       - Bulk stock update
//! PUT    /api/products/{id}        - Partial update
//! DELETE /api/products/{id}        - Delete
//!
//! # Orders
//! GET    /api/orders               - Order listing (q/status/page/limit)
//! POST   /api/orders               - Create from the admin form
//! PUT    /api/orders/{id}          - Update form fields
//! PUT    /api/orders/{id}/status   - Update status only
//! DELETE /api/orders/{id}          - Delete
//!
//! # Statistics & uploads
//! GET    /api/stats                - Summary + per-day chart for a period
//! POST   /api/upload               - Forward files to Supabase Storage
//! ```

pub mod orders;
pub mod products;
pub mod stats;
pub mod upload;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/stock", put(products::update_stock))
        .route(
            "/{id}",
            put(products::update).delete(products::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/{id}", put(orders::update).delete(orders::delete))
        .route("/{id}/status", put(orders::update_status))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .route("/api/stats", get(stats::show))
        .route("/api/upload", post(upload::upload))
}
