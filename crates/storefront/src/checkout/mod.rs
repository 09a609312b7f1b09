//! The checkout workflow.
//!
//! Turns the current cart plus a delivery form into a single order-creation
//! request against the backend, and clears the cart only once the backend
//! has confirmed the order. The cart-clearing transition happens strictly
//! after the success response is parsed, so a half-committed state (order
//! created, cart still full - or worse, the reverse) cannot be observed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use dala_core::{Order, OrderItem, Phone};

use crate::cart::{CartRepository, CartStore, repository::CartStoreError};
use crate::supabase::{OrderCreate, SupabaseError};

/// The delivery/payment details collected at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryForm {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub delivery_method: String,
    pub payment_method: String,
}

/// Field-keyed validation messages.
pub type FieldErrors = BTreeMap<String, String>;

/// Validate the delivery form before any remote call is made.
///
/// # Errors
///
/// Returns a `{field: message}` map describing every invalid field.
pub fn validate_delivery_form(form: &DeliveryForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.customer_name.trim().len() < 2 {
        errors.insert(
            "customer_name".to_owned(),
            "Name must be at least 2 characters.".to_owned(),
        );
    }

    if Phone::parse(&form.phone).is_err() {
        errors.insert(
            "phone".to_owned(),
            "Enter a valid Kazakhstan phone number.".to_owned(),
        );
    }

    if form.address.trim().len() < 5 {
        errors.insert(
            "address".to_owned(),
            "Address must be at least 5 characters.".to_owned(),
        );
    }

    if form.delivery_method.is_empty() {
        errors.insert(
            "delivery_method".to_owned(),
            "A delivery method is required.".to_owned(),
        );
    }

    if form.payment_method.is_empty() {
        errors.insert(
            "payment_method".to_owned(),
            "A payment method is required.".to_owned(),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// The seam between checkout and the backend's order creation.
pub trait OrderGateway {
    /// Create an order, returning the stored record with its server-assigned
    /// ID, status, and timestamp.
    fn create_order(
        &self,
        input: &OrderCreate,
    ) -> impl Future<Output = Result<Order, SupabaseError>> + Send;
}

/// Errors surfaced by [`Checkout::submit`].
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The backend rejected or failed the order creation.
    #[error("order creation failed: {0}")]
    Backend(#[from] SupabaseError),

    /// The order was created but the cleared cart could not be persisted.
    #[error("cart persistence failed: {0}")]
    Cart(#[from] CartStoreError),
}

/// One checkout attempt's state machine.
///
/// `in_flight` is true strictly between submission start and resolution so
/// callers can suppress duplicate submission while a request is pending.
#[derive(Debug)]
pub struct Checkout<G> {
    gateway: G,
    in_flight: bool,
    success: Option<Order>,
    error: Option<String>,
}

impl<G: OrderGateway> Checkout<G> {
    /// Create an idle checkout over the given gateway.
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: false,
            success: None,
            error: None,
        }
    }

    /// Submit the cart with the given delivery form.
    ///
    /// An empty cart is a guard, not an error: no request is issued and no
    /// success/failure transition happens. On success the created order is
    /// recorded and the cart is cleared; on failure the cart is left
    /// untouched and the error is both recorded and returned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Backend`] if order creation fails, or
    /// [`CheckoutError::Cart`] if the emptied cart cannot be persisted after
    /// a confirmed order.
    pub async fn submit<R: CartRepository>(
        &mut self,
        cart: &mut CartStore<R>,
        form: &DeliveryForm,
    ) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Ok(());
        }

        self.in_flight = true;
        self.error = None;

        // Snapshot the lines so the order is stable even if the cart mutates
        // while the request is in flight; the total comes from the snapshot,
        // not from the live cart.
        let items: Vec<OrderItem> = cart
            .cart()
            .items
            .iter()
            .map(|line| OrderItem {
                id: line.id.clone(),
                name: line.name.clone(),
                qty: line.qty,
                price: line.price,
            })
            .collect();
        let total: Decimal = items
            .iter()
            .map(|i| i.price * Decimal::from(i.qty))
            .sum();

        let input = OrderCreate {
            customer_name: form.customer_name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            delivery_method: form.delivery_method.clone(),
            payment_method: form.payment_method.clone(),
            items,
            total,
        };

        let result = self.gateway.create_order(&input).await;
        self.in_flight = false;

        match result {
            Ok(order) => {
                self.success = Some(order);
                cart.clear().await?;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(CheckoutError::Backend(e))
            }
        }
    }

    /// Whether a submission is currently pending.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The created order, if the last submission succeeded.
    #[must_use]
    pub const fn success(&self) -> Option<&Order> {
        self.success.as_ref()
    }

    /// The failure message, if the last submission failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the workflow, returning the created order if any.
    #[must_use]
    pub fn into_success(self) -> Option<Order> {
        self.success
    }
}
