//! Business verification states.

use serde::{Deserialize, Serialize};

/// Admin-controlled approval state of a business owner.
///
/// Only meaningful for accounts with the owner role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    /// Wire value, also used as the CSS modifier for status badges.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the business still waits for an admin decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome an admin submits when reviewing a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationDecision {
    Approved,
    Rejected,
}

impl VerificationDecision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl From<VerificationDecision> for VerificationStatus {
    fn from(decision: VerificationDecision) -> Self {
        match decision {
            VerificationDecision::Approved => Self::Approved,
            VerificationDecision::Rejected => Self::Rejected,
        }
    }
}

impl std::fmt::Display for VerificationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let status: VerificationStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, VerificationStatus::Approved);
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_decision_maps_to_status() {
        assert_eq!(
            VerificationStatus::from(VerificationDecision::Rejected),
            VerificationStatus::Rejected
        );
        assert!(!VerificationStatus::from(VerificationDecision::Approved).is_pending());
    }

    #[test]
    fn test_pending_is_default() {
        assert!(VerificationStatus::default().is_pending());
    }
}
