//! Admin data client over the Supabase `PostgREST` API.
//!
//! Full read/write access to products and orders via the service-role key.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use dala_core::{Order, OrderId, OrderStatus, Page, Product, ProductId};

use crate::config::SupabaseConfig;

use super::query::{OrderFilters, escape_pattern, order_params, page_range, parse_content_range};
use super::{ACCEPT_SINGLE_OBJECT, SupabaseError};

/// Product fields for create/update; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProductWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Order fields writable from the admin edit form.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OrderFormWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

/// A row payload with the creation timestamp attached.
#[derive(Serialize)]
struct Created<'a, T: Serialize> {
    #[serde(flatten)]
    row: &'a T,
    created_at: String,
}

/// A row payload with the update timestamp attached.
#[derive(Serialize)]
struct Updated<'a, T: Serialize> {
    #[serde(flatten)]
    row: &'a T,
    updated_at: String,
}

/// Client for admin product and order operations.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl AdminClient {
    /// Create a new admin client from the Supabase configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                http: reqwest::Client::new(),
                rest_url: format!("{}/rest/v1", config.url),
                api_key: config.service_role_key.expose_secret().to_string(),
            }),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, format!("{}/{table}", self.inner.rest_url))
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
    }

    /// Execute a list request, returning the rows and the total row count
    /// from the `Content-Range` header.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(String, String)],
        range: Option<(u64, u64)>,
    ) -> Result<(Vec<T>, Option<u64>), SupabaseError> {
        let mut request = self.request(reqwest::Method::GET, table).query(params);

        if let Some((from, to)) = range {
            request = request
                .header("Range-Unit", "items")
                .header("Range", format!("{from}-{to}"))
                .header("Prefer", "count=exact");
        }

        let response = request.send().await?;

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

    /// Execute a write request expected to return exactly one row.
    async fn write_one<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        missing: impl FnOnce() -> String,
    ) -> Result<T, SupabaseError> {
        let response = request
            .header("Prefer", "return=representation")
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .send()
            .await?;

        let status = response.status();

        // PostgREST answers 406 when the single-object filter matched no row
        if status == reqwest::StatusCode::NOT_ACCEPTABLE
            || status == reqwest::StatusCode::NOT_FOUND
        {
            return Err(SupabaseError::NotFound(missing()));
        }

        if !status.is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the `PostgREST` root does not answer.
    pub async fn ping(&self) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .http
            .get(format!("{}/", self.inner.rest_url))
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List products for the admin panel, newest first, with optional search.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        q: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Page<Product>, SupabaseError> {
        let mut params = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];

        if let Some(q) = q {
            let q = escape_pattern(q);
            if !q.is_empty() {
                params.push((
                    "or".to_string(),
                    format!("(name.ilike.*{q}*,description.ilike.*{q}*)"),
                ));
            }
        }

        let (items, total) = self
            .fetch_rows::<Product>("products", &params, Some(page_range(page, limit)))
            .await?;

        let total = total.unwrap_or(items.len() as u64);
        Ok(Page {
            items,
            total,
            page: page.max(1),
            limit,
        })
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    #[instrument(skip(self, write))]
    pub async fn create_product(&self, write: &ProductWrite) -> Result<Product, SupabaseError> {
        let row = Created {
            row: write,
            created_at: Utc::now().to_rfc3339(),
        };

        self.write_one(
            self.request(reqwest::Method::POST, "products").json(&row),
            || "Product insert returned no row".to_string(),
        )
        .await
    }

    /// Update a product by ID; only the set fields change.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if no such product exists, or
    /// another error if the update fails.
    #[instrument(skip(self, write), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        write: &ProductWrite,
    ) -> Result<Product, SupabaseError> {
        let row = Updated {
            row: write,
            updated_at: Utc::now().to_rfc3339(),
        };

        self.write_one(
            self.request(reqwest::Method::PATCH, "products")
                .query(&[("id", format!("eq.{id}"))])
                .json(&row),
            || format!("Product not found: {id}"),
        )
        .await
    }

    /// Delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), SupabaseError> {
        let response = self
            .request(reqwest::Method::DELETE, "products")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }
        Ok(())
    }

    /// Update stock counts for several products.
    ///
    /// Individual failures are logged and skipped so one bad row does not
    /// abort the batch.
    ///
    /// # Errors
    ///
    /// Returns an error only if a request cannot be sent at all.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn bulk_update_stock(
        &self,
        items: &[(ProductId, i64)],
    ) -> Result<(), SupabaseError> {
        for (id, stock) in items {
            let response = self
                .request(reqwest::Method::PATCH, "products")
                .query(&[("id", format!("eq.{id}"))])
                .json(&serde_json::json!({ "stock": stock }))
                .send()
                .await?;

            if !response.status().is_success() {
                let err = SupabaseError::from_response(response).await;
                warn!("bulk stock update failed for {id}: {err}");
            }
        }
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders with search, status filter and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filters: &OrderFilters) -> Result<Page<Order>, SupabaseError> {
        let page = filters.page();
        let limit = filters.limit();
        let params = order_params(filters);

        let (items, total) = self
            .fetch_rows::<Order>("orders", &params, Some(page_range(page, limit)))
            .await?;

        let total = total.unwrap_or(items.len() as u64);
        Ok(Page {
            items,
            total,
            page,
            limit,
        })
    }

    /// Create an order from the admin form.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    #[instrument(skip(self, write))]
    pub async fn create_order(&self, write: &OrderFormWrite) -> Result<Order, SupabaseError> {
        let row = Created {
            row: write,
            created_at: Utc::now().to_rfc3339(),
        };

        self.write_one(
            self.request(reqwest::Method::POST, "orders").json(&row),
            || "Order insert returned no row".to_string(),
        )
        .await
    }

    /// Update an order's form fields by ID.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if no such order exists, or
    /// another error if the update fails.
    #[instrument(skip(self, write), fields(id = %id))]
    pub async fn update_order(
        &self,
        id: &OrderId,
        write: &OrderFormWrite,
    ) -> Result<Order, SupabaseError> {
        self.write_one(
            self.request(reqwest::Method::PATCH, "orders")
                .query(&[("id", format!("eq.{id}"))])
                .json(write),
            || format!("Order not found: {id}"),
        )
        .await
    }

    /// Update only an order's status.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if no such order exists, or
    /// another error if the update fails.
    #[instrument(skip(self), fields(id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, SupabaseError> {
        self.write_one(
            self.request(reqwest::Method::PATCH, "orders")
                .query(&[("id", format!("eq.{id}"))])
                .json(&serde_json::json!({ "status": status })),
            || format!("Order not found: {id}"),
        )
        .await
    }

    /// Delete an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), SupabaseError> {
        let response = self
            .request(reqwest::Method::DELETE, "orders")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }
        Ok(())
    }

    /// Fetch every order created inside the date range, oldest first
    /// (statistics input).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn orders_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Order>, SupabaseError> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("created_at".to_string(), format!("gte.{from}")),
            ("created_at".to_string(), format!("lte.{to}")),
            ("order".to_string(), "created_at.asc".to_string()),
        ];

        let (orders, _) = self.fetch_rows::<Order>("orders", &params, None).await?;
        Ok(orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_write_skips_unset_fields() {
        let write = ProductWrite {
            stock: Some(5),
            ..ProductWrite::default()
        };
        let json = serde_json::to_value(&write).unwrap();
        assert_eq!(json, serde_json::json!({ "stock": 5 }));
    }

    #[test]
    fn test_created_wrapper_flattens_payload() {
        let write = OrderFormWrite {
            customer_name: Some("Aigerim".to_string()),
            phone: Some("77012345678".to_string()),
            total: Some(Decimal::from(12000)),
            status: Some(OrderStatus::Pending),
        };
        let row = Created {
            row: &write,
            created_at: "2025-11-03T10:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["customer_name"], "Aigerim");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["created_at"], "2025-11-03T10:00:00+00:00");
    }
}
