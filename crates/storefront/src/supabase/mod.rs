//! Supabase backend clients for the storefront.
//!
//! # Architecture
//!
//! - Supabase is the source of truth - NO local sync, direct `PostgREST` calls
//! - Catalog reads use the anon key and are cached in-memory via `moka`
//!   (5-minute TTL); order creation uses the service-role key
//! - Filters translate to `PostgREST` operators (`eq`/`gte`/`lte`/`ilike`);
//!   pagination uses `Range` headers with `Prefer: count=exact`
//!
//! # Example
//!
//! ```rust,ignore
//! use dala_storefront::supabase::{CatalogClient, ProductFilters};
//!
//! let client = CatalogClient::new(&config.supabase);
//!
//! // Search the catalog
//! let page = client
//!     .get_products(&ProductFilters {
//!         q: Some("futbolka".into()),
//!         ..ProductFilters::default()
//!     })
//!     .await?;
//! ```

mod cache;
mod catalog;
mod orders;
pub mod query;

pub use catalog::CatalogClient;
pub use orders::{OrderCreate, OrdersClient};
pub use query::ProductFilters;

use thiserror::Error;

/// Accept header asking `PostgREST` for exactly one object.
pub(crate) const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Errors that can occur when talking to the Supabase backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend reported an error status.
    #[error("backend error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl SupabaseError {
    /// Build a [`SupabaseError`] from a non-success response, draining the
    /// body for the `PostgREST` error message.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Self::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .map_or_else(
                |_| body.chars().take(200).collect::<String>(),
                |e| e.message,
            );

        Self::Backend {
            status: status.as_u16(),
            message,
        }
    }
}

/// The error body shape returned by `PostgREST`.
#[derive(Debug, serde::Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_error_display() {
        let err = SupabaseError::NotFound("product p1".to_string());
        assert_eq!(err.to_string(), "Not found: product p1");

        let err = SupabaseError::Backend {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (HTTP 409): duplicate key");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = SupabaseError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
