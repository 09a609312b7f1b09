//! Transient admin order-edit form state.
//!
//! The form is isolated from the order list being browsed: opening and
//! closing an editor never touches any order until explicit save, and cancel
//! simply drops the store. Presence of an `id` decides whether saving means
//! create or update-by-id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dala_core::{Order, OrderId, OrderStatus};

/// The editable order fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Present when editing an existing order; absent in create mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub phone: String,
    pub total: Decimal,
    pub status: OrderStatus,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            id: None,
            customer_name: String::new(),
            phone: String::new(),
            total: Decimal::ZERO,
            status: OrderStatus::Pending,
        }
    }
}

impl OrderForm {
    /// Create-or-update dispatch, decided by the presence of `id`.
    #[must_use]
    pub fn save_action(&self) -> SaveAction {
        self.id
            .clone()
            .map_or(SaveAction::Create, SaveAction::Update)
    }
}

/// The form fields addressable by [`OrderFormStore::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFormField {
    CustomerName,
    Phone,
    Total,
    Status,
}

/// What submitting the form should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    /// No `id` on the form: create a new order.
    Create,
    /// `id` present: update that order.
    Update(OrderId),
}

/// A field value that could not be converted to the form's field type.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {field}: {value}")]
pub struct InvalidFieldValue {
    pub field: &'static str,
    pub value: String,
}

/// Holder of one editor's transient form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFormStore {
    form: OrderForm,
}

impl OrderFormStore {
    /// A store in create mode with empty defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to empty defaults (`""`, `0`, pending) with no `id` - create mode.
    pub fn reset(&mut self) {
        self.form = OrderForm::default();
    }

    /// Populate the form from an existing order - edit mode.
    pub fn load_order(&mut self, order: &Order) {
        self.form = OrderForm {
            id: Some(order.id.clone()),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            total: order.total,
            status: order.status,
        };
    }

    /// Update a single field from its form-input string.
    ///
    /// No domain validation happens here (that is the validators' concern);
    /// only the type conversion for total/status can fail.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFieldValue`] when the value cannot be converted.
    pub fn set_field(
        &mut self,
        field: OrderFormField,
        value: &str,
    ) -> Result<(), InvalidFieldValue> {
        match field {
            OrderFormField::CustomerName => self.form.customer_name = value.to_owned(),
            OrderFormField::Phone => self.form.phone = value.to_owned(),
            OrderFormField::Total => {
                self.form.total = value.parse().map_err(|_| InvalidFieldValue {
                    field: "total",
                    value: value.to_owned(),
                })?;
            }
            OrderFormField::Status => {
                self.form.status = value.parse().map_err(|_| InvalidFieldValue {
                    field: "status",
                    value: value.to_owned(),
                })?;
            }
        }
        Ok(())
    }

    /// The current form state.
    #[must_use]
    pub const fn form(&self) -> &OrderForm {
        &self.form
    }

    /// Create-or-update dispatch, decided by the presence of `id`.
    #[must_use]
    pub fn save_action(&self) -> SaveAction {
        self.form.save_action()
    }
}
