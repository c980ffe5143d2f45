//! Backend diagnostics.

use tracing::instrument;

use super::{ApiClient, ApiError};
use crate::models::BackendHealth;

impl ApiClient {
    /// Query the backend's health endpoint. Needs no token.
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or unhealthy.
    #[instrument(skip_all)]
    pub async fn health(&self) -> Result<BackendHealth, ApiError> {
        self.get_absolute(self.health_url().clone()).await
    }
}
