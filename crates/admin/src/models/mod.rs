//! Admin domain models.

pub mod order_form;

pub use order_form::{OrderForm, OrderFormField, OrderFormStore, SaveAction};
