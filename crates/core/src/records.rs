//! Product and order records as stored by the backend.
//!
//! These mirror the backend's `products` and `orders` tables. Nullable
//! columns deserialize leniently: a missing or `null` field falls back to
//! the type's default so partially-filled rows (e.g. orders created from the
//! admin form, which carry no items or address) still load.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{OrderId, OrderStatus, ProductId};

/// Deserialize `null` as the type's default value.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single purchased line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default, deserialize_with = "null_to_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub delivery_method: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total: Decimal,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_deserializes_nullable_columns() {
        let json = r#"{
            "id": "p1",
            "name": "Futbolka",
            "price": 4990,
            "stock": 12,
            "category": null,
            "description": null,
            "sizes": null,
            "images": null,
            "created_at": null,
            "updated_at": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Decimal::from(4990));
        assert!(product.category.is_none());
        assert!(product.sizes.is_empty());
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_order_defaults_for_admin_created_rows() {
        // Admin form creation stores no address/items; those columns are null.
        let json = r#"{
            "id": "o1",
            "customer_name": "Aigerim",
            "phone": "77012345678",
            "address": null,
            "delivery_method": null,
            "payment_method": null,
            "items": null,
            "total": 12000,
            "status": null,
            "created_at": "2025-11-03T10:00:00Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.address, "");
        assert!(order.items.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::from(12000));
    }

    #[test]
    fn test_order_item_roundtrip() {
        let item = OrderItem {
            id: ProductId::new("p1"),
            name: "Futbolka".to_owned(),
            price: Decimal::from(100),
            qty: 3,
        };
        let json = serde_json::to_string(&item).unwrap();
        let parsed: OrderItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
