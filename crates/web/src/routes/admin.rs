//! Admin console: platform stats, business verification, user list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bizsphere_core::{BusinessId, VerificationDecision};

use super::{Banner, redirect_with_error};
use crate::filters;
use crate::middleware::{AuthenticatedUser, RequireAdmin};
use crate::models::User;
use crate::services::admin::{self as console, AdminSnapshot, VerifyError};
use crate::state::AppState;

/// Console tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Dashboard,
    Businesses,
    Users,
}

impl AdminTab {
    /// Tab named by the query string, defaulting to the overview.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("businesses") => Self::Businesses,
            Some("users") => Self::Users,
            _ => Self::Dashboard,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Businesses => "businesses",
            Self::Users => "users",
        }
    }
}

/// Admin console page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminConsoleTemplate {
    pub user: User,
    pub tab: &'static str,
    pub snapshot: AdminSnapshot,
    pub pending_count: usize,
    pub banner: Option<Banner>,
}

impl AdminConsoleTemplate {
    fn new(user: User, tab: AdminTab, snapshot: AdminSnapshot, banner: Option<Banner>) -> Self {
        Self {
            user,
            tab: tab.as_str(),
            pending_count: snapshot.pending_count(),
            snapshot,
            banner,
        }
    }
}

/// Load every dataset and render the console.
///
/// A pipeline failure is shown as an error banner unless the caller already
/// has one to show.
pub async fn render_console(
    state: &AppState,
    auth: AuthenticatedUser,
    tab: AdminTab,
    banner: Option<Banner>,
) -> Response {
    let load = console::load_snapshot(state.api(), &auth.token).await;
    let banner = banner.or_else(|| load.failure.as_ref().map(|f| Banner::error(f.message())));
    AdminConsoleTemplate::new(auth.user, tab, load.snapshot, banner).into_response()
}

/// Verification form data.
#[derive(Debug, Deserialize)]
pub struct VerifyForm {
    pub status: VerificationDecision,
    #[serde(default)]
    pub notes: String,
}

/// Approve or reject a business, then show the refreshed console.
#[instrument(skip(state, auth, form), fields(business_id = %id, decision = %form.status))]
pub async fn verify(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<VerifyForm>,
) -> Response {
    let id = BusinessId::new(id);
    let result =
        console::verify_business(state.api(), &auth.token, &id, form.status, &form.notes).await;

    match result {
        Ok(load) => {
            let banner = load.failure.as_ref().map_or_else(
                || Banner::success(format!("Business {} successfully!", form.status)),
                |failure| Banner::error(failure.message()),
            );
            AdminConsoleTemplate::new(auth.user, AdminTab::Businesses, load.snapshot, Some(banner))
                .into_response()
        }
        Err(VerifyError::MissingNotes) => {
            redirect_with_error(AdminTab::Businesses.as_str(), &VerifyError::MissingNotes.to_string())
                .into_response()
        }
        Err(VerifyError::Api(error)) => {
            tracing::warn!(%error, "Business verification failed");
            redirect_with_error(
                AdminTab::Businesses.as_str(),
                &format!("Failed to verify business: {}", error.user_message()),
            )
            .into_response()
        }
    }
}
