//! Route guards and authentication extractors.
//!
//! [`guard`] is the pure decision: given the kind of page and the session
//! state, render it, redirect, or show a placeholder. The extractors run an
//! auth check against the visitor's session first and then apply it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::RETRY_AFTER, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use bizsphere_core::Role;

use super::session::session_context;
use crate::error::set_sentry_user;
use crate::models::{BearerToken, User};
use crate::services::SessionState;
use crate::state::AppState;

/// Where signed-out visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in visitors are sent from public-only pages.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Who a page is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Signed-in users only.
    Protected,
    /// Signed-out visitors only (login, registration).
    Public,
}

/// What to do with a guarded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth check still in flight.
    Placeholder,
    Render,
    Redirect(&'static str),
}

/// Decide whether a page renders for the current session.
#[must_use]
pub const fn guard(access: Access, state: &SessionState) -> GuardDecision {
    if state.loading {
        return GuardDecision::Placeholder;
    }
    match (access, state.user.is_some()) {
        (Access::Protected, false) => GuardDecision::Redirect(LOGIN_PATH),
        (Access::Public, true) => GuardDecision::Redirect(DASHBOARD_PATH),
        _ => GuardDecision::Render,
    }
}

/// A resolved user together with the token that resolved them.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: BearerToken,
}

/// Error returned when a guard does not let the request through.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to another page.
    Redirect(&'static str),
    /// Auth state is not known yet.
    Loading,
    /// Signed in with the wrong role.
    Forbidden,
    /// No session layer, or the session store failed.
    SessionUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(path) => Redirect::to(path).into_response(),
            Self::Loading => (
                StatusCode::SERVICE_UNAVAILABLE,
                [(RETRY_AFTER, "1")],
                "Loading...",
            )
                .into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "You do not have access to this page").into_response()
            }
            Self::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Run the auth check for this request and apply the guard.
///
/// Returns the authenticated user when one is signed in and the guard
/// renders.
async fn check(
    parts: &Parts,
    state: &AppState,
    access: Access,
) -> Result<Option<AuthenticatedUser>, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or(AuthRejection::SessionUnavailable)?;

    let mut ctx = session_context(session, state);
    ctx.check_auth().await;

    match guard(access, ctx.state()) {
        GuardDecision::Placeholder => return Err(AuthRejection::Loading),
        GuardDecision::Redirect(path) => return Err(AuthRejection::Redirect(path)),
        GuardDecision::Render => {}
    }

    let token = ctx.token().await.map_err(|error| {
        tracing::error!(%error, "Failed to read session token");
        AuthRejection::SessionUnavailable
    })?;

    Ok(match (ctx.into_state().user, token) {
        (Some(user), Some(token)) => {
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Some(AuthenticatedUser { user, token })
        }
        _ => None,
    })
}

async fn require_user(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, AuthRejection> {
    check(parts, state, Access::Protected)
        .await?
        .ok_or(AuthRejection::Redirect(LOGIN_PATH))
}

/// Extractor that requires a signed-in user.
///
/// Signed-out visitors are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireUser(auth): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user.name)
/// }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_user(parts, state).await.map(Self)
    }
}

/// Extractor for pages only signed-out visitors see.
///
/// Signed-in users are redirected to the dashboard.
pub struct PublicOnly;

impl FromRequestParts<AppState> for PublicOnly {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(parts, state, Access::Public).await?;
        Ok(Self)
    }
}

/// Extractor that requires a signed-in admin.
pub struct RequireAdmin(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = require_user(parts, state).await?;
        if auth.user.role != Role::Admin {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(auth))
    }
}

/// Extractor that requires a signed-in business owner.
pub struct RequireOwner(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = require_user(parts, state).await?;
        if auth.user.role != Role::Owner {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(auth))
    }
}
