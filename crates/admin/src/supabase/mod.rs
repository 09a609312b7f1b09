//! Supabase backend clients for the admin panel.
//!
//! # Architecture
//!
//! - All operations use the service-role key (this binary is trusted)
//! - Data operations go through `PostgREST` (`/rest/v1`); product images go
//!   through the Storage API (`/storage/v1`)
//! - Nothing is cached here - the admin always sees live data

mod client;
pub mod query;
pub mod storage;

pub use client::{AdminClient, OrderFormWrite, ProductWrite};
pub use storage::StorageClient;

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

    /// A file upload failed.
    #[error("upload failed for {file}: {message}")]
    Upload { file: String, message: String },
}

impl SupabaseError {
    /// Build a [`SupabaseError`] from a non-success response, draining the
    /// body for the backend's error message.
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
        let message = serde_json::from_str::<BackendErrorBody>(&body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |e| e.message,
        );

        Self::Backend {
            status: status.as_u16(),
            message,
        }
    }
}

/// The error body shape returned by `PostgREST` and the Storage API.
#[derive(Debug, serde::Deserialize)]
struct BackendErrorBody {
    message: String,
}
