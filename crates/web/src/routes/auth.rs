//! Authentication route handlers.
//!
//! Login and registration go through the session context, which stores the
//! API token in the visitor's session. Failures re-render the form with the
//! API's message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bizsphere_core::{Email, Role};

use super::{Banner, MessageQuery};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::auth::DASHBOARD_PATH;
use crate::middleware::{PublicOnly, RequireUser, session_context};
use crate::models::RegisterRequest;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: String,
    pub phone: String,
    pub business_name: String,
}

impl RegisterForm {
    /// Check the form and build the API request.
    ///
    /// # Errors
    ///
    /// Returns a message for the first problem found.
    pub fn validate(&self) -> Result<RegisterRequest, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter your name");
        }
        let email = Email::parse(&self.email).map_err(|_| "Please enter a valid email address")?;
        if self.password.expose_secret().is_empty() {
            return Err("Please choose a password");
        }
        let role = self
            .role
            .parse::<Role>()
            .ok()
            .filter(|role| Role::SELF_SERVICE.contains(role))
            .ok_or("Please choose an account type")?;
        let business_name = non_empty(&self.business_name);
        if role == Role::Owner && business_name.is_none() {
            return Err("Business name is required for business owners");
        }

        Ok(RegisterRequest {
            name: name.to_string(),
            email,
            password: self.password.clone(),
            role,
            phone: non_empty(&self.phone),
            business_name: business_name.filter(|_| role == Role::Owner),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub banner: Option<Banner>,
}

/// One `<option>` of the account type select.
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub form: RegisterForm,
    pub roles: Vec<RoleOption>,
    pub banner: Option<Banner>,
}

impl RegisterTemplate {
    fn new(mut form: RegisterForm, banner: Option<Banner>) -> Self {
        // Never echo the password back
        form.password = SecretString::default();
        let roles = Role::SELF_SERVICE
            .into_iter()
            .map(|role| RoleOption {
                value: role.as_str(),
                label: role.label(),
                selected: form.role == role.as_str(),
            })
            .collect();
        Self {
            form,
            roles,
            banner,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display login page.
#[instrument(skip_all)]
pub async fn login_page(_: PublicOnly, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        email: String::new(),
        banner: query.banner(),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    _: PublicOnly,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return LoginTemplate {
            email: form.email,
            banner: Some(Banner::error("Please enter a valid email address")),
        }
        .into_response();
    };

    let mut ctx = session_context(session, &state);
    match ctx.login(&email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Redirect::to(DASHBOARD_PATH).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "Login failed");
            LoginTemplate {
                email: email.into_inner(),
                banner: Some(Banner::error(error.user_message())),
            }
            .into_response()
        }
    }
}

/// Display registration page.
#[instrument(skip_all)]
pub async fn register_page(_: PublicOnly, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let form = RegisterForm {
        role: Role::Customer.as_str().to_string(),
        ..RegisterForm::default()
    };
    RegisterTemplate::new(form, query.banner())
}

/// Handle registration form submission.
#[instrument(skip(state, session, form), fields(email = %form.email, role = %form.role))]
pub async fn register(
    _: PublicOnly,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(message) => {
            return RegisterTemplate::new(form, Some(Banner::error(message))).into_response();
        }
    };

    let mut ctx = session_context(session, &state);
    match ctx.register(&request).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, role = %user.role, "User registered");
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Redirect::to(DASHBOARD_PATH).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "Registration failed");
            RegisterTemplate::new(form, Some(Banner::error(error.user_message()))).into_response()
        }
    }
}

/// Handle logout. No API call; the token is simply forgotten.
#[instrument(skip_all)]
pub async fn logout(
    RequireUser(_auth): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let mut ctx = session_context(session.clone(), &state);
    if let Err(error) = ctx.logout().await {
        tracing::error!(%error, "Failed to clear session token");
    }
    if let Err(error) = session.flush().await {
        tracing::error!(%error, "Failed to flush session");
    }
    clear_sentry_user();

    Redirect::to("/login?success=You%20have%20been%20logged%20out").into_response()
}
