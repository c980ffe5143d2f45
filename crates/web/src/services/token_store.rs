//! Bearer token persistence.
//!
//! Exactly one token per store. The session-backed store is what the web app
//! uses; the memory store backs tests and non-persistent contexts.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_sessions::Session;

use super::SessionError;
use crate::models::{BearerToken, session_keys};

/// Storage for the single bearer token of a session.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> impl Future<Output = Result<Option<BearerToken>, SessionError>> + Send;

    /// Replace any stored token.
    fn set(&self, token: &BearerToken) -> impl Future<Output = Result<(), SessionError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Token store backed by the visitor's `tower-sessions` session.
#[derive(Clone)]
pub struct SessionTokenStore {
    session: Session,
}

impl SessionTokenStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl TokenStore for SessionTokenStore {
    async fn get(&self) -> Result<Option<BearerToken>, SessionError> {
        let token: Option<String> = self.session.get(session_keys::TOKEN).await?;
        Ok(token.map(BearerToken::new))
    }

    async fn set(&self, token: &BearerToken) -> Result<(), SessionError> {
        // New identity, new session id
        self.session.cycle_id().await?;
        self.session.insert(session_keys::TOKEN, token.expose()).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.session.remove::<String>(session_keys::TOKEN).await?;
        Ok(())
    }
}

/// In-process token store.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<BearerToken>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<BearerToken>, SessionError> {
        Ok(self.token.lock().await.clone())
    }

    async fn set(&self, token: &BearerToken) -> Result<(), SessionError> {
        *self.token.lock().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().await = None;
        Ok(())
    }
}
