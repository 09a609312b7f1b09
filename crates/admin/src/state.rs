//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::supabase::{AdminClient, StorageClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// Supabase clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    client: AdminClient,
    storage: StorageClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let client = AdminClient::new(&config.supabase);
        let storage = StorageClient::new(&config.supabase);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                storage,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the admin data client.
    #[must_use]
    pub fn client(&self) -> &AdminClient {
        &self.inner.client
    }

    /// Get a reference to the storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }
}
