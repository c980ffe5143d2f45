//! HTTP route handlers for the BizSphere front-end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Redirect to /dashboard
//! GET  /dashboard                 - Role-specific dashboard (?tab=...)
//!
//! # Auth
//! GET  /login                     - Login page (signed-out only)
//! POST /login                     - Login action
//! GET  /register                  - Registration page (signed-out only)
//! POST /register                  - Registration action
//! POST /logout                    - Logout action
//!
//! # Admin (admin role)
//! POST /admin/businesses/{id}/verify - Approve or reject a business
//!
//! # Products (owner role)
//! GET  /products/new              - New product form
//! POST /products                  - Create product
//! GET  /products/{id}/edit        - Edit product form
//! POST /products/{id}             - Update product
//! POST /products/{id}/toggle      - Activate or deactivate
//! GET  /products/{id}/delete      - Delete confirmation page
//! POST /products/{id}/delete      - Delete product (requires confirm=yes)
//!
//! # Diagnostics
//! GET  /health                    - Liveness
//! GET  /health/ready              - Backend reachability
//! GET  /connection-test           - Backend status page
//! ```

pub mod admin;
pub mod auth;
pub mod business;
pub mod dashboard;
pub mod health;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// The banner these parameters ask for, errors first.
    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        self.error
            .clone()
            .map(Banner::error)
            .or_else(|| self.success.clone().map(Banner::success))
    }
}

/// Inline status message shown above page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub success: bool,
    pub message: String,
}

impl Banner {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        if self.success {
            "banner-success"
        } else {
            "banner-error"
        }
    }
}

/// Redirect to a dashboard tab with an error banner.
pub(crate) fn redirect_with_error(tab: &str, message: &str) -> Redirect {
    Redirect::to(&format!(
        "/dashboard?tab={tab}&error={}",
        urlencoding::encode(message)
    ))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the admin action routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/businesses/{id}/verify", post(admin::verify))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create))
        .route("/new", get(products::new_page))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit_page))
        .route("/{id}/toggle", post(products::toggle))
        .route(
            "/{id}/delete",
            get(products::delete_page).post(products::delete),
        )
}

/// Create the diagnostic routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/connection-test", get(health::connection_test))
}

/// Create all routes for the front-end.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/dashboard", get(dashboard::show))
        .merge(auth_routes())
        .merge(health_routes())
        .nest("/admin", admin_routes())
        .nest("/products", product_routes())
}
