//! Admin console endpoints.

use serde::Serialize;
use tracing::instrument;

use bizsphere_core::{BusinessId, VerificationDecision};

use super::{AdminApi, ApiClient, ApiError};
use crate::models::{AdminStats, BearerToken, Business, User};

#[derive(Serialize)]
struct VerifyRequest<'a> {
    status: VerificationDecision,
    notes: &'a str,
}

impl AdminApi for ApiClient {
    #[instrument(skip_all)]
    async fn list_businesses(&self, token: &BearerToken) -> Result<Vec<Business>, ApiError> {
        self.get("admin/businesses", Some(token)).await
    }

    #[instrument(skip_all)]
    async fn dashboard_stats(&self, token: &BearerToken) -> Result<AdminStats, ApiError> {
        self.get("admin/dashboard-stats", Some(token)).await
    }

    #[instrument(skip_all)]
    async fn list_users(&self, token: &BearerToken) -> Result<Vec<User>, ApiError> {
        self.get("admin/users", Some(token)).await
    }

    #[instrument(skip(self, token, notes), fields(business_id = %id))]
    async fn verify_business(
        &self,
        token: &BearerToken,
        id: &BusinessId,
        decision: VerificationDecision,
        notes: &str,
    ) -> Result<(), ApiError> {
        let path = format!("admin/verify-business/{}", urlencoding::encode(id.as_str()));
        self.put(&path, &VerifyRequest { status: decision, notes }, Some(token))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_verify_business_sends_status_and_notes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/verify-business/b1"))
            .and(body_json(json!({ "status": "rejected", "notes": "Missing GST number" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap();
        let client = ApiClient::new(&config).unwrap();
        client
            .verify_business(
                &BearerToken::new("admin-token"),
                &BusinessId::new("b1"),
                VerificationDecision::Rejected,
                "Missing GST number",
            )
            .await
            .unwrap();
    }
}
