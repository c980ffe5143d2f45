//! HTTP middleware stack for the web front-end.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (set `x-request-id`, propagate it to the response)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Security headers
//! 5. Session layer (tower-sessions over [`session_store::SessionMemoryStore`])
//!
//! Authentication is not a layer: the extractors in [`auth`] resolve the
//! session token per request.

pub mod auth;
pub mod security_headers;
pub mod session;
pub mod session_store;

pub use auth::{
    Access, AuthenticatedUser, GuardDecision, PublicOnly, RequireAdmin, RequireOwner, RequireUser,
    guard,
};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, session_context};
pub use session_store::{SWEEP_PERIOD, SessionMemoryStore, sweep_expired};
