//! Admin console data loading and business verification.
//!
//! The console loads three datasets in a fixed order. Each step is a
//! separate request; the first failure stops the pipeline so later datasets
//! stay empty and the view can say which one failed.

use thiserror::Error;

use bizsphere_core::{BusinessId, VerificationDecision};

use crate::api::{AdminApi, ApiError};
use crate::models::{AdminStats, BearerToken, Business, User};

/// One dataset of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStep {
    Businesses,
    Stats,
    Users,
}

impl AdminStep {
    /// Load order.
    pub const PIPELINE: [Self; 3] = [Self::Businesses, Self::Stats, Self::Users];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Businesses => "businesses",
            Self::Stats => "dashboard stats",
            Self::Users => "users",
        }
    }
}

/// Everything the console displays.
#[derive(Debug, Clone, Default)]
pub struct AdminSnapshot {
    pub businesses: Vec<Business>,
    pub stats: Option<AdminStats>,
    pub users: Vec<User>,
}

impl AdminSnapshot {
    /// Businesses still waiting for a decision.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.businesses.iter().filter(|b| b.is_pending()).count()
    }
}

/// The step that stopped a pipeline run.
#[derive(Debug)]
pub struct SnapshotFailure {
    pub step: AdminStep,
    pub error: ApiError,
}

impl SnapshotFailure {
    #[must_use]
    pub fn message(&self) -> String {
        format!("Failed to load {}: {}", self.step.label(), self.error.user_message())
    }
}

/// Result of a pipeline run: whatever loaded, plus the failure if any.
#[derive(Debug, Default)]
pub struct AdminLoad {
    pub snapshot: AdminSnapshot,
    pub failure: Option<SnapshotFailure>,
}

/// Errors from a verification action.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Rejections must say why.
    #[error("Please provide a reason for rejection")]
    MissingNotes,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fetch a single dataset into `snapshot`.
///
/// # Errors
///
/// Returns the API error for this step; `snapshot` is left untouched.
pub async fn fetch_step<A: AdminApi>(
    api: &A,
    token: &BearerToken,
    step: AdminStep,
    snapshot: &mut AdminSnapshot,
) -> Result<(), ApiError> {
    match step {
        AdminStep::Businesses => snapshot.businesses = api.list_businesses(token).await?,
        AdminStep::Stats => snapshot.stats = Some(api.dashboard_stats(token).await?),
        AdminStep::Users => snapshot.users = api.list_users(token).await?,
    }
    Ok(())
}

/// Run the whole pipeline, stopping at the first failure.
pub async fn load_snapshot<A: AdminApi>(api: &A, token: &BearerToken) -> AdminLoad {
    let mut snapshot = AdminSnapshot::default();

    for step in AdminStep::PIPELINE {
        if let Err(error) = fetch_step(api, token, step, &mut snapshot).await {
            tracing::error!(step = step.label(), %error, "Admin console load failed");
            return AdminLoad {
                snapshot,
                failure: Some(SnapshotFailure { step, error }),
            };
        }
    }

    AdminLoad {
        snapshot,
        failure: None,
    }
}

/// Record a verification decision, then reload the whole console.
///
/// Exactly one update request followed by one pipeline run; the update's
/// failure is returned without reloading.
///
/// # Errors
///
/// Returns [`VerifyError::MissingNotes`] for a rejection without notes
/// (no request is made), or the update's API error.
pub async fn verify_business<A: AdminApi>(
    api: &A,
    token: &BearerToken,
    id: &BusinessId,
    decision: VerificationDecision,
    notes: &str,
) -> Result<AdminLoad, VerifyError> {
    let notes = notes.trim();
    if decision == VerificationDecision::Rejected && notes.is_empty() {
        return Err(VerifyError::MissingNotes);
    }

    api.verify_business(token, id, decision, notes).await?;
    tracing::info!(business_id = %id, %decision, "Business verification recorded");

    Ok(load_snapshot(api, token).await)
}
