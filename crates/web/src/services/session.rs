//! Session context: who is signed in, and how they sign in and out.
//!
//! A [`SessionContext`] is built per request from the visitor's token store.
//! Holding a token implies the user is resolvable; when resolution fails the
//! token is dropped so the next request starts signed out.

use secrecy::SecretString;
use thiserror::Error;

use bizsphere_core::Email;

use super::TokenStore;
use crate::api::{ApiError, AuthApi};
use crate::models::{AuthResponse, BearerToken, RegisterRequest, User};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token store could not be read or written.
    #[error("Session store error: {0}")]
    Store(String),
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl SessionError {
    /// Text suitable for re-rendering a form with an error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Store(_) => "Your session could not be saved. Please try again.".to_string(),
        }
    }
}

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    /// True until the first auth check completes.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Per-request authentication context.
pub struct SessionContext<S, A> {
    store: S,
    api: A,
    state: SessionState,
}

impl<S: TokenStore, A: AuthApi> SessionContext<S, A> {
    #[must_use]
    pub fn new(store: S, api: A) -> Self {
        Self {
            store,
            api,
            state: SessionState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Resolve the stored token to a user.
    ///
    /// Without a token no remote call is made. Any failure is logged and
    /// clears the token. Always leaves `loading` false.
    pub async fn check_auth(&mut self) {
        match self.resolve().await {
            Ok(user) => self.state.user = user,
            Err(error) => {
                tracing::warn!(%error, "Auth check failed, clearing stored token");
                self.state.user = None;
                if let Err(error) = self.store.clear().await {
                    tracing::warn!(%error, "Failed to clear stored token");
                }
            }
        }
        self.state.loading = false;
    }

    async fn resolve(&self) -> Result<Option<User>, SessionError> {
        let Some(token) = self.store.get().await? else {
            return Ok(None);
        };
        let user = self.api.current_user(&token).await?;
        Ok(Some(user))
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the API rejection or a store failure. Nothing is stored on failure.
    pub async fn login(
        &mut self,
        email: &Email,
        password: &SecretString,
    ) -> Result<User, SessionError> {
        let response = self.api.login(email, password).await?;
        self.establish(response).await
    }

    /// Create an account and sign in to it.
    ///
    /// # Errors
    ///
    /// Returns the API rejection or a store failure. Nothing is stored on failure.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<User, SessionError> {
        let response = self.api.register(request).await?;
        self.establish(response).await
    }

    async fn establish(&mut self, response: AuthResponse) -> Result<User, SessionError> {
        let AuthResponse { token, user } = response;
        self.store.set(&BearerToken::new(token)).await?;
        self.state.user = Some(user.clone());
        self.state.loading = false;
        Ok(user)
    }

    /// Forget the token and user. No remote call.
    ///
    /// # Errors
    ///
    /// Returns error if the token store cannot be cleared.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.state.user = None;
        self.store.clear().await
    }

    /// The token currently held, for bearer calls made by views.
    ///
    /// # Errors
    ///
    /// Returns error if the token store cannot be read.
    pub async fn token(&self) -> Result<Option<BearerToken>, SessionError> {
        self.store.get().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiClient;
    use crate::config::ApiConfig;
    use crate::services::MemoryTokenStore;

    fn user_json() -> serde_json::Value {
        json!({ "_id": "u1", "name": "Priya", "email": "priya@example.com", "role": "owner" })
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap()).unwrap()
    }

    fn email() -> Email {
        Email::parse("priya@example.com").unwrap()
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = SessionState::default();
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_login_stores_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "T", "user": user_json() })),
            )
            .mount(&server)
            .await;

        let store = MemoryTokenStore::new();
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        let user = ctx.login(&email(), &SecretString::from("pw")).await.unwrap();

        assert_eq!(user.name, "Priya");
        assert_eq!(ctx.user(), Some(&user));
        assert_eq!(store.get().await.unwrap().unwrap().expose(), "T");
        assert_eq!(ctx.token().await.unwrap().unwrap().expose(), "T");
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let store = MemoryTokenStore::new();
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        let err = ctx.login(&email(), &SecretString::from("bad")).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(ctx.user().is_none());
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_stores_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "token": "R", "user": user_json() })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::new();
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        let request = RegisterRequest {
            name: "Priya".to_string(),
            email: email(),
            password: secrecy::SecretString::from("pw123456"),
            role: bizsphere_core::Role::Owner,
            phone: None,
            business_name: Some("Priya Crafts".to_string()),
        };
        ctx.register(&request).await.unwrap();

        assert_eq!(store.get().await.unwrap().unwrap().expose(), "R");
        assert!(ctx.user().is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_user_without_remote_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "T", "user": user_json() })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::new();
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        ctx.login(&email(), &SecretString::from("pw")).await.unwrap();
        ctx.logout().await.unwrap();

        assert!(ctx.user().is_none());
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_check_auth_without_token_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(0)
            .mount(&server)
            .await;

        let mut ctx = SessionContext::new(MemoryTokenStore::new(), client_for(&server));
        ctx.check_auth().await;

        assert!(!ctx.state().loading);
        assert!(ctx.user().is_none());
    }

    #[tokio::test]
    async fn test_check_auth_resolves_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::with_token(BearerToken::new("T"));
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        ctx.check_auth().await;

        assert!(!ctx.state().loading);
        assert_eq!(ctx.user().unwrap().id.as_str(), "u1");
        assert!(store.get().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_check_auth_failure_clears_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
            )
            .mount(&server)
            .await;

        let store = MemoryTokenStore::with_token(BearerToken::new("stale"));
        let mut ctx = SessionContext::new(store.clone(), client_for(&server));
        ctx.check_auth().await;

        let state = ctx.into_state();
        assert!(!state.loading);
        assert!(state.user.is_none());
        assert!(store.get().await.unwrap().is_none());
    }
}
