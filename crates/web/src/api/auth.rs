//! Authentication endpoints.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use bizsphere_core::Email;

use super::{ApiClient, ApiError, AuthApi};
use crate::models::user::CurrentUserResponse;
use crate::models::{AuthResponse, BearerToken, RegisterRequest, User};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthApi for ApiClient {
    #[instrument(skip_all, fields(email = %request.email, role = %request.role))]
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("auth/register", request, None).await
    }

    #[instrument(skip_all, fields(email = %email))]
    async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        self.post("auth/login", &body, None).await
    }

    #[instrument(skip_all)]
    async fn current_user(&self, token: &BearerToken) -> Result<User, ApiError> {
        let response: CurrentUserResponse = self.get("auth/me", Some(token)).await?;
        Ok(response.into_user())
    }
}
