//! Request validation.
//!
//! Validators run before any backend call and report every problem at once
//! as a `{field: message}` map; on success they produce the write payload
//! for the Supabase client.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use dala_core::{OrderStatus, Phone};

use crate::supabase::{OrderFormWrite, ProductWrite};

/// Field-keyed validation messages.
pub type FieldErrors = BTreeMap<String, String>;

/// Admin order form submission (create and update).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFormPayload {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    OrderStatus::Pending.as_str().to_owned()
}

/// Product creation fields as raw form strings (multipart input).
#[derive(Debug, Clone, Default)]
pub struct ProductCreateDraft {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sizes: Vec<String>,
}

/// Product update submission (JSON input, partial).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdatePayload {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Validate the admin order form.
///
/// # Errors
///
/// Returns a `{field: message}` map describing every invalid field.
pub fn validate_order_form(payload: &OrderFormPayload) -> Result<OrderFormWrite, FieldErrors> {
    let mut errors = FieldErrors::new();

    if payload.customer_name.trim().len() < 2 {
        errors.insert(
            "customer_name".to_owned(),
            "Name must be at least 2 characters.".to_owned(),
        );
    }

    if Phone::parse(&payload.phone).is_err() {
        errors.insert(
            "phone".to_owned(),
            "Enter a valid Kazakhstan phone number.".to_owned(),
        );
    }

    if payload.total < Decimal::ZERO {
        errors.insert("total".to_owned(), "Total must not be negative.".to_owned());
    }

    let status = match payload.status.parse::<OrderStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.insert("status".to_owned(), "Invalid status.".to_owned());
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(OrderFormWrite {
        customer_name: Some(payload.customer_name.clone()),
        phone: Some(payload.phone.clone()),
        total: Some(payload.total),
        status,
    })
}

/// Validate a status-update request.
///
/// # Errors
///
/// Returns a `{"status": message}` map when the value is not a known status.
pub fn validate_status(status: &str) -> Result<OrderStatus, FieldErrors> {
    status.parse::<OrderStatus>().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert("status".to_owned(), "Invalid status.".to_owned());
        errors
    })
}

/// Validate a product creation draft, parsing the raw form strings.
///
/// # Errors
///
/// Returns a `{field: message}` map describing every invalid field.
pub fn validate_product_create(draft: &ProductCreateDraft) -> Result<ProductWrite, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.name.trim().len() < 2 {
        errors.insert(
            "name".to_owned(),
            "Name must be at least 2 characters.".to_owned(),
        );
    }

    let price = match draft.price.parse::<Decimal>() {
        Ok(price) if price >= Decimal::ZERO => Some(price),
        _ => {
            errors.insert(
                "price".to_owned(),
                "Price must be a number >= 0.".to_owned(),
            );
            None
        }
    };

    let stock = match draft.stock.parse::<i64>() {
        Ok(stock) if stock >= 0 => Some(stock),
        _ => {
            errors.insert(
                "stock".to_owned(),
                "Stock must be an integer >= 0.".to_owned(),
            );
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductWrite {
        name: Some(draft.name.clone()),
        price,
        stock,
        category: draft.category.clone(),
        description: draft.description.clone(),
        sizes: Some(draft.sizes.clone()),
        images: None,
    })
}

/// Validate a partial product update; only set fields are checked.
///
/// # Errors
///
/// Returns a `{field: message}` map describing every invalid field.
pub fn validate_product_update(payload: &ProductUpdatePayload) -> Result<ProductWrite, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(name) = payload.name.as_deref()
        && name.trim().len() < 2
    {
        errors.insert(
            "name".to_owned(),
            "Name must be at least 2 characters.".to_owned(),
        );
    }

    if let Some(price) = payload.price
        && price < Decimal::ZERO
    {
        errors.insert(
            "price".to_owned(),
            "Price must be a number >= 0.".to_owned(),
        );
    }

    if let Some(stock) = payload.stock
        && stock < 0
    {
        errors.insert(
            "stock".to_owned(),
            "Stock must be an integer >= 0.".to_owned(),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductWrite {
        name: payload.name.clone(),
        price: payload.price,
        stock: payload.stock,
        category: payload.category.clone(),
        description: payload.description.clone(),
        sizes: payload.sizes.clone(),
        images: payload.images.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order_payload() -> OrderFormPayload {
        OrderFormPayload {
            customer_name: "Aigerim".to_owned(),
            phone: "77012345678".to_owned(),
            total: Decimal::from(12000),
            status: "pending".to_owned(),
        }
    }

    #[test]
    fn test_valid_order_form() {
        let write = validate_order_form(&order_payload()).unwrap();
        assert_eq!(write.customer_name.as_deref(), Some("Aigerim"));
        assert_eq!(write.status, Some(OrderStatus::Pending));
    }

    #[test]
    fn test_order_form_collects_all_errors() {
        let payload = OrderFormPayload {
            customer_name: "A".to_owned(),
            phone: "nope".to_owned(),
            total: Decimal::from(-1),
            status: "shipped".to_owned(),
        };

        let errors = validate_order_form(&payload).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("customer_name"));
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("total"));
        assert!(errors.contains_key("status"));
    }

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("delivered").unwrap(), OrderStatus::Delivered);
        assert!(validate_status("shipped").unwrap_err().contains_key("status"));
    }

    #[test]
    fn test_valid_product_create() {
        let draft = ProductCreateDraft {
            name: "Futbolka".to_owned(),
            price: "4990".to_owned(),
            stock: "12".to_owned(),
            category: Some("tops".to_owned()),
            description: None,
            sizes: vec!["S".to_owned(), "M".to_owned()],
        };

        let write = validate_product_create(&draft).unwrap();
        assert_eq!(write.price, Some(Decimal::from(4990)));
        assert_eq!(write.stock, Some(12));
        assert_eq!(write.sizes.as_deref(), Some(&["S".to_owned(), "M".to_owned()][..]));
    }

    #[test]
    fn test_product_create_rejects_bad_numbers() {
        let draft = ProductCreateDraft {
            name: "Futbolka".to_owned(),
            price: "abc".to_owned(),
            stock: "-3".to_owned(),
            ..ProductCreateDraft::default()
        };

        let errors = validate_product_create(&draft).unwrap_err();
        assert!(errors.contains_key("price"));
        assert!(errors.contains_key("stock"));
    }

    #[test]
    fn test_product_create_rejects_negative_price() {
        let draft = ProductCreateDraft {
            name: "Futbolka".to_owned(),
            price: "-1".to_owned(),
            stock: "0".to_owned(),
            ..ProductCreateDraft::default()
        };

        assert!(validate_product_create(&draft).unwrap_err().contains_key("price"));
    }

    #[test]
    fn test_product_update_checks_only_set_fields() {
        let payload = ProductUpdatePayload {
            stock: Some(7),
            ..ProductUpdatePayload::default()
        };

        let write = validate_product_update(&payload).unwrap();
        assert_eq!(write.stock, Some(7));
        assert_eq!(write.name, None);
    }

    #[test]
    fn test_product_update_rejects_short_name() {
        let payload = ProductUpdatePayload {
            name: Some("x".to_owned()),
            ..ProductUpdatePayload::default()
        };

        assert!(validate_product_update(&payload).unwrap_err().contains_key("name"));
    }
}
