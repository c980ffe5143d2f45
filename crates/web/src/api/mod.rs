//! Typed client for the remote BizSphere REST API.
//!
//! [`ApiClient`] wraps a single `reqwest::Client` with the API base URL,
//! JSON headers and timeouts. Endpoints are grouped by the traits below so
//! services can depend on the narrowest surface they need.
//!
//! # Endpoints
//!
//! ```text
//! POST /auth/register                 -> {token, user}
//! POST /auth/login                    -> {token, user}
//! GET  /auth/me                (auth) -> {user} | user
//! GET  /admin/businesses       (auth) -> [Business]
//! GET  /admin/dashboard-stats  (auth) -> AdminStats
//! GET  /admin/users            (auth) -> [User]
//! PUT  /admin/verify-business/{id} (auth) {status, notes}
//! GET  /products/my-products   (auth) -> [Product]
//! POST /products               (auth) ProductPayload
//! PUT  /products/{id}          (auth) ProductPayload | {isActive}
//! DELETE /products/{id}        (auth)
//! GET  /products/stats/business (auth) -> BusinessStats
//! GET  {health_url}                   -> BackendHealth
//! ```

mod admin;
mod auth;
mod client;
mod health;
mod products;

use std::future::Future;

use reqwest::StatusCode;
use secrecy::SecretString;
use thiserror::Error;

pub use client::ApiClient;

use bizsphere_core::{BusinessId, Email, ProductId, VerificationDecision};

use crate::models::{
    AdminStats, AuthResponse, BearerToken, Business, BusinessStats, Product, ProductPayload,
    RegisterRequest, User,
};

/// Errors that can occur when talking to the BizSphere API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// A 2xx body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint path could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Text suitable for an inline error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Http(e) if e.is_timeout() => {
                "The BizSphere service did not respond in time. Please try again.".to_string()
            }
            Self::Http(_) => "Could not reach the BizSphere service.".to_string(),
            Self::Parse(_) | Self::InvalidUrl(_) => {
                "Unexpected response from the BizSphere service.".to_string()
            }
        }
    }

    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: error_message(status, body),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Prefers the JSON `message` field, then `error`, then the raw text, and
/// finally the canonical reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let field = ["message", "error"]
            .into_iter()
            .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .find(|text| !text.trim().is_empty());
        if let Some(text) = field {
            return text.to_string();
        }
    }

    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// Authentication endpoints.
pub trait AuthApi: Send + Sync {
    /// Create an account and receive a token for it.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    /// Exchange credentials for a token.
    fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    /// Resolve the account a token belongs to.
    fn current_user(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;
}

/// Admin console endpoints. All require an admin token.
pub trait AdminApi: Send + Sync {
    fn list_businesses(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<Vec<Business>, ApiError>> + Send;

    fn dashboard_stats(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<AdminStats, ApiError>> + Send;

    fn list_users(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<Vec<User>, ApiError>> + Send;

    /// Record an approval or rejection for a business.
    fn verify_business(
        &self,
        token: &BearerToken,
        id: &BusinessId,
        decision: VerificationDecision,
        notes: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Product catalog endpoints for the signed-in owner.
pub trait ProductApi: Send + Sync {
    fn my_products(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    fn create_product(
        &self,
        token: &BearerToken,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn update_product(
        &self,
        token: &BearerToken,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Partial update carrying only the active flag.
    fn set_product_active(
        &self,
        token: &BearerToken,
        id: &ProductId,
        is_active: bool,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_product(
        &self,
        token: &BearerToken,
        id: &ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn business_stats(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<BusinessStats, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid credentials","error":"auth"}"#,
        );
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let msg = error_message(StatusCode::FORBIDDEN, r#"{"error":"Access denied"}"#);
        assert_eq!(msg, "Access denied");
    }

    #[test]
    fn test_error_message_uses_plain_text_body() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(msg, "upstream down");
    }

    #[test]
    fn test_error_message_uses_reason_for_empty_body() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(error_message(StatusCode::NOT_FOUND, "{}"), "Not Found");
    }

    #[test]
    fn test_status_error_keeps_code_and_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"Token expired"}"#);
        assert!(matches!(err, ApiError::Status { status: 401, .. }));
        assert_eq!(err.user_message(), "Token expired");
        assert_eq!(err.to_string(), "API error: 401 - Token expired");
    }
}
