//! Backend diagnostic payload.

use serde::Deserialize;

/// Body of the backend's `/health` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendHealth {
    pub backend: String,
    pub database: String,
    pub timestamp: String,
}
