//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use dala_core::{ApiResponse, Page, Product, ProductId};

use crate::error::Result;
use crate::state::AppState;
use crate::supabase::ProductFilters;
use crate::supabase::query::{OrderDir, ProductOrderBy};

/// Default page size for the public catalog.
const CATALOG_PAGE_SIZE: u32 = 12;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<Decimal>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<Decimal>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(rename = "orderDir")]
    pub order_dir: Option<String>,
}

impl From<ProductsQuery> for ProductFilters {
    fn from(query: ProductsQuery) -> Self {
        Self {
            q: query.q,
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
            page: query.page,
            limit: Some(query.limit.unwrap_or(CATALOG_PAGE_SIZE)),
            order_by: query.order_by.as_deref().and_then(ProductOrderBy::from_param),
            order_dir: query.order_dir.as_deref().map(|d| {
                if d == "asc" { OrderDir::Asc } else { OrderDir::Desc }
            }),
        }
    }
}

/// Product listing with search, filtering and pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ApiResponse<Page<Product>>>> {
    let filters = ProductFilters::from(query);
    let page = state.catalog().get_products(&filters).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Product detail by ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = state.catalog().get_product(&id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_maps_to_filters_with_default_limit() {
        let query = ProductsQuery {
            q: Some("futbolka".to_string()),
            category: None,
            min_price: None,
            max_price: None,
            page: Some(2),
            limit: None,
            order_by: None,
            order_dir: None,
        };

        let filters = ProductFilters::from(query);
        assert_eq!(filters.q.as_deref(), Some("futbolka"));
        assert_eq!(filters.page, Some(2));
        assert_eq!(filters.limit, Some(CATALOG_PAGE_SIZE));
    }

    #[test]
    fn test_query_maps_order_params() {
        let query = ProductsQuery {
            q: None,
            category: None,
            min_price: None,
            max_price: None,
            page: None,
            limit: Some(24),
            order_by: Some("price".to_string()),
            order_dir: Some("asc".to_string()),
        };

        let filters = ProductFilters::from(query);
        assert_eq!(filters.limit, Some(24));
        assert_eq!(filters.order_by, Some(ProductOrderBy::Price));
        assert_eq!(filters.order_dir, Some(OrderDir::Asc));
    }

    #[test]
    fn test_unknown_order_column_is_ignored() {
        let query = ProductsQuery {
            q: None,
            category: None,
            min_price: None,
            max_price: None,
            page: None,
            limit: None,
            order_by: Some("DROP TABLE".to_string()),
            order_dir: None,
        };

        let filters = ProductFilters::from(query);
        assert_eq!(filters.order_by, None);
    }
}
