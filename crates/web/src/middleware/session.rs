//! Session middleware configuration.
//!
//! Sessions live in process memory. They carry only the API bearer token, so
//! losing them on restart just signs everyone out. Expired sessions are
//! dropped by [`sweep_expired`](super::session_store::sweep_expired).

use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::api::ApiClient;
use crate::config::WebConfig;
use crate::middleware::session_store::SessionMemoryStore;
use crate::services::{SessionContext, SessionTokenStore};
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bizsphere_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer(
    config: &WebConfig,
    store: SessionMemoryStore,
) -> SessionManagerLayer<SessionMemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Session context for the visitor behind `session`.
#[must_use]
pub fn session_context(
    session: Session,
    state: &AppState,
) -> SessionContext<SessionTokenStore, ApiClient> {
    SessionContext::new(SessionTokenStore::new(session), state.api().clone())
}
