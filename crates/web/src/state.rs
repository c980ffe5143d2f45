//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::WebConfig;
use crate::middleware::session_store::SessionMemoryStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Immutable after startup apart from the
/// session store, which holds each visitor's bearer token.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    api: ApiClient,
    sessions: SessionMemoryStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn new(config: WebConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                sessions: SessionMemoryStore::default(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the BizSphere API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Session records for every visitor.
    #[must_use]
    pub fn sessions(&self) -> &SessionMemoryStore {
        &self.inner.sessions
    }
}
