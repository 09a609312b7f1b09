//! Catalog read client over the Supabase `PostgREST` API.
//!
//! Uses the anon key; plain (unfiltered) listings and product fetches are
//! cached for 5 minutes.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use dala_core::{Page, Product, ProductId};

use crate::config::SupabaseConfig;

use super::cache::CacheValue;
use super::query::{ProductFilters, page_range, parse_content_range, product_params};
use super::{ACCEPT_SINGLE_OBJECT, SupabaseError};

/// Client for public catalog reads.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client from the Supabase configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                http: reqwest::Client::new(),
                rest_url: format!("{}/rest/v1", config.url),
                api_key: config.anon_key.clone(),
                cache,
            }),
        }
    }

    /// Execute a `PostgREST` list request, returning the rows and the total
    /// row count from the `Content-Range` header.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(String, String)],
        range: (u64, u64),
    ) -> Result<(Vec<T>, Option<u64>), SupabaseError> {
        let (from, to) = range;

        let response = self
            .inner
            .http
            .get(format!("{}/{table}", self.inner.rest_url))
            .query(params)
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .header("Range-Unit", "items")
            .header("Range", format!("{from}-{to}"))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        let total = response
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        let rows = serde_json::from_str(&response.text().await?)?;
        Ok((rows, total))
    }

    /// Get a paginated, filtered product listing.
    ///
    /// Plain listings (no search/category/price filters) are cached per page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Page<Product>, SupabaseError> {
        let page = filters.page();
        let limit = filters.limit();
        let cache_key = format!("products:{page}:{limit}");

        // Check cache (only for plain listings without search/filters)
        if filters.is_plain()
            && let Some(CacheValue::Products(cached)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(cached);
        }

        let params = product_params(filters);
        let (items, total) = self
            .fetch_rows::<Product>("products", &params, page_range(page, limit))
            .await?;

        let total = total.unwrap_or(items.len() as u64);
        let result = Page {
            items,
            total,
            page,
            limit,
        };

        // Cache if not a filtered query
        if filters.is_plain() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(result.clone()))
                .await;
        }

        Ok(result)
    }

    /// Get a single product by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the product does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, SupabaseError> {
        let cache_key = format!("product:{id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let response = self
            .inner
            .http
            .get(format!("{}/products", self.inner.rest_url))
            .query(&[("select", "*"), ("id", &format!("eq.{id}"))])
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .send()
            .await?;

        let status = response.status();

        // PostgREST answers 406 when the single-object filter matched no row
        if status == reqwest::StatusCode::NOT_ACCEPTABLE
            || status == reqwest::StatusCode::NOT_FOUND
        {
            return Err(SupabaseError::NotFound(format!("Product not found: {id}")));
        }

        if !status.is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        let product: Product = serde_json::from_str(&response.text().await?)?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: &ProductId) {
        let cache_key = format!("product:{id}");
        self.inner.cache.invalidate(&cache_key).await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
