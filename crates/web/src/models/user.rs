//! User accounts and authentication payloads.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use bizsphere_core::{Email, Role, UserId, VerificationStatus};

/// A BizSphere account as returned by the API.
///
/// Created server-side at registration; the front-end only reads it.
/// Verification fields are meaningful for owners only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the owner's business may manage products.
    ///
    /// Uses the API's explicit flag when present and falls back to the
    /// verification status otherwise.
    #[must_use]
    pub fn is_business_verified(&self) -> bool {
        self.business_verified.unwrap_or_else(|| {
            self.verification_status == Some(VerificationStatus::Approved)
        })
    }

    /// Verification status, defaulting to pending for owners that lack one.
    #[must_use]
    pub fn status(&self) -> VerificationStatus {
        self.verification_status.unwrap_or_default()
    }

    /// Registration date for tables.
    #[must_use]
    pub fn joined_on(&self) -> String {
        super::format_date(self.created_at.as_ref())
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Successful response of the login and registration endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response of `GET /auth/me`.
///
/// Some deployments wrap the user (`{"user": {...}}`), others return it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentUserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl CurrentUserResponse {
    pub(crate) fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn owner_json() -> serde_json::Value {
        json!({
            "_id": "65f1a2",
            "name": "Asha",
            "email": "asha@chai.in",
            "role": "owner",
            "businessName": "Asha's Chai",
            "verificationStatus": "pending",
            "createdAt": "2024-03-01T10:00:00Z"
        })
    }

    #[test]
    fn test_user_accepts_underscore_id() {
        let user: User = serde_json::from_value(owner_json()).unwrap();
        assert_eq!(user.id.as_str(), "65f1a2");
        assert_eq!(user.business_name.as_deref(), Some("Asha's Chai"));
        assert_eq!(user.joined_on(), "01/03/2024");
    }

    #[test]
    fn test_business_verified_flag_wins() {
        let mut value = owner_json();
        value["businessVerified"] = json!(true);
        let user: User = serde_json::from_value(value).unwrap();
        assert!(user.is_business_verified());
    }

    #[test]
    fn test_business_verified_falls_back_to_status() {
        let pending: User = serde_json::from_value(owner_json()).unwrap();
        assert!(!pending.is_business_verified());

        let mut value = owner_json();
        value["verificationStatus"] = json!("approved");
        let approved: User = serde_json::from_value(value).unwrap();
        assert!(approved.is_business_verified());
    }

    #[test]
    fn test_current_user_response_shapes() {
        let wrapped: CurrentUserResponse =
            serde_json::from_value(json!({ "user": owner_json() })).unwrap();
        let bare: CurrentUserResponse = serde_json::from_value(owner_json()).unwrap();
        assert_eq!(wrapped.into_user(), bare.into_user());
    }

    #[test]
    fn test_register_request_omits_missing_business() {
        let request = RegisterRequest {
            name: "Ravi".to_string(),
            email: Email::parse("ravi@example.com").unwrap(),
            password: SecretString::from("hunter22"),
            role: Role::Rider,
            phone: None,
            business_name: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["role"], "rider");
        assert_eq!(value["password"], "hunter22");
        assert!(!format!("{request:?}").contains("hunter22"));
        assert!(value.get("businessName").is_none());
    }
}
