//! Shared helpers for Dala Market integration tests.
//!
//! The actual tests live in `tests/` and are `#[ignore]`d by default since
//! they require running binaries and a reachable Supabase project.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store (the storefront cart lives in
/// a session cookie, so one client equals one visitor).
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn visitor_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
