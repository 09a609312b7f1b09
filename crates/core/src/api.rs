//! JSON response envelope shared by the storefront and admin APIs.
//!
//! Every route responds with `{ success, data?, error? }`; list endpoints
//! wrap their items in [`Page`]. Validation failures additionally carry a
//! field-keyed `details` map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The response envelope returned by every API route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-keyed validation messages, present only on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    /// A failed response carrying a user-facing message.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
        }
    }

    /// A validation failure carrying field-keyed messages.
    #[must_use]
    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Validation error".to_owned()),
            details: Some(errors),
        }
    }
}

/// A page of results with the pagination parameters echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let resp = ApiResponse::ok(42);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"success":true,"data":42}"#);
    }

    #[test]
    fn test_err_envelope_shape() {
        let resp = ApiResponse::<()>::err("boom");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"boom"}"#);
    }

    #[test]
    fn test_validation_envelope_carries_details() {
        let mut errors = BTreeMap::new();
        errors.insert("phone".to_owned(), "invalid phone".to_owned());
        let resp = ApiResponse::<()>::validation(errors);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "Validation error");
        assert_eq!(json["details"]["phone"], "invalid phone");
    }
}
