//! Order creation client over the Supabase `PostgREST` API.
//!
//! Order inserts bypass row-level security, so this client uses the
//! service-role key and must never leak it to responses. Nothing here is
//! cached - orders are mutable state.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

use dala_core::{Order, OrderId, OrderItem, OrderStatus};

use crate::checkout::OrderGateway;
use crate::config::SupabaseConfig;

use super::{ACCEPT_SINGLE_OBJECT, SupabaseError};

/// Payload for creating an order from the checkout flow.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderCreate {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub delivery_method: String,
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    /// Client-computed total; re-derived from `items` before insertion.
    pub total: Decimal,
}

impl OrderCreate {
    /// Sum of `price * qty` over the items.
    #[must_use]
    pub fn derived_total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.qty))
            .sum()
    }
}

/// The row actually inserted: the creation payload plus server-side fields.
#[derive(Debug, Serialize)]
struct OrderInsert<'a> {
    customer_name: &'a str,
    phone: &'a str,
    address: &'a str,
    delivery_method: &'a str,
    payment_method: &'a str,
    items: &'a [OrderItem],
    total: Decimal,
    status: OrderStatus,
    created_at: String,
}

impl<'a> OrderInsert<'a> {
    fn new(payload: &'a OrderCreate) -> Self {
        Self {
            customer_name: &payload.customer_name,
            phone: &payload.phone,
            address: &payload.address,
            delivery_method: &payload.delivery_method,
            payment_method: &payload.payment_method,
            items: &payload.items,
            total: payload.derived_total(),
            status: OrderStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Client for order creation and lookup.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl OrdersClient {
    /// Create a new orders client from the Supabase configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(OrdersClientInner {
                http: reqwest::Client::new(),
                rest_url: format!("{}/rest/v1", config.url),
                api_key: config.service_role_key.expose_secret().to_string(),
            }),
        }
    }

    /// Create an order.
    ///
    /// The stored total is always re-derived from the items so a stale or
    /// tampered client total never reaches the database; status and creation
    /// timestamp are assigned here.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    #[instrument(skip(self, input), fields(items = input.items.len()))]
    pub async fn create_order(&self, input: &OrderCreate) -> Result<Order, SupabaseError> {
        let row = OrderInsert::new(input);

        let response = self
            .inner
            .http
            .post(format!("{}/orders", self.inner.rest_url))
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .header("Prefer", "return=representation")
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .json(&row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        let order: Order = serde_json::from_str(&response.text().await?)?;
        Ok(order)
    }

    /// Get an order by its ID (e.g., for the order confirmation view).
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the order does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, SupabaseError> {
        let response = self
            .inner
            .http
            .get(format!("{}/orders", self.inner.rest_url))
            .query(&[("select", "*"), ("id", &format!("eq.{id}"))])
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_ACCEPTABLE
            || status == reqwest::StatusCode::NOT_FOUND
        {
            return Err(SupabaseError::NotFound(format!("Order not found: {id}")));
        }

        if !status.is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        let order: Order = serde_json::from_str(&response.text().await?)?;
        Ok(order)
    }
}

impl OrderGateway for OrdersClient {
    async fn create_order(&self, input: &OrderCreate) -> Result<Order, SupabaseError> {
        Self::create_order(self, input).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dala_core::ProductId;
    use rust_decimal::Decimal;

    fn item(id: &str, price: Decimal, qty: u32) -> OrderItem {
        OrderItem {
            id: ProductId::new(id),
            name: format!("item {id}"),
            price,
            qty,
        }
    }

    #[test]
    fn test_derived_total_sums_lines() {
        let input = OrderCreate {
            customer_name: "Aigerim".to_string(),
            phone: "77012345678".to_string(),
            address: "Almaty, Abay 10".to_string(),
            delivery_method: "courier".to_string(),
            payment_method: "cash".to_string(),
            items: vec![item("p1", Decimal::from(100), 2), item("p2", Decimal::from(50), 3)],
            total: Decimal::from(0), // ignored, re-derived
        };
        assert_eq!(input.derived_total(), Decimal::from(350));
    }

    #[test]
    fn test_order_insert_rederives_total_and_sets_status() {
        let input = OrderCreate {
            customer_name: "Aigerim".to_string(),
            phone: "77012345678".to_string(),
            address: "Almaty, Abay 10".to_string(),
            delivery_method: "courier".to_string(),
            payment_method: "cash".to_string(),
            items: vec![item("p1", Decimal::from(100), 2)],
            total: Decimal::from(999), // stale client total, must not be stored
        };
        let row = OrderInsert::new(&input);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["customer_name"], "Aigerim");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["total"], "200");
        assert_eq!(json["items"][0]["qty"], 2);
    }
}
