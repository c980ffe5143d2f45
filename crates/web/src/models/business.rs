//! Business owner accounts as listed in the admin console.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use bizsphere_core::{BusinessId, Email, VerificationStatus};

/// An owner account awaiting or past verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(alias = "_id")]
    pub id: BusinessId,
    #[serde(default)]
    pub business_name: Option<String>,
    /// Owner's name.
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Business {
    /// Business name, falling back to the owner's name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn registered_on(&self) -> String {
        super::format_date(self.created_at.as_ref())
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.verification_status.is_pending()
    }
}
