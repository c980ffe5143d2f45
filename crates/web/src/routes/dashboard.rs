//! Role-based dashboard dispatch.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bizsphere_core::Role;

use super::{Banner, MessageQuery, admin, business};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::User;
use crate::state::AppState;

/// Which dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Admin,
    Business,
    General,
}

/// Pick the dashboard for `user`: admins first, then owners, then everyone else.
#[must_use]
pub const fn select_view(user: &User) -> DashboardView {
    match user.role {
        Role::Admin => DashboardView::Admin,
        Role::Owner => DashboardView::Business,
        Role::Customer | Role::Rider => DashboardView::General,
    }
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    #[serde(flatten)]
    pub messages: MessageQuery,
}

/// Dashboard for customers and riders.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/general.html")]
pub struct GeneralDashboardTemplate {
    pub user: User,
    pub banner: Option<Banner>,
}

/// Dashboard page handler.
#[instrument(skip(state, auth, query), fields(user_id = %auth.user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(auth): RequireUser,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let banner = query.messages.banner();
    let tab = query.tab.as_deref();

    match select_view(&auth.user) {
        DashboardView::Admin => {
            admin::render_console(&state, auth, admin::AdminTab::parse(tab), banner).await
        }
        DashboardView::Business => {
            business::render(&state, auth, business::BusinessTab::parse(tab), banner).await
        }
        DashboardView::General => GeneralDashboardTemplate {
            user: auth.user,
            banner,
        }
        .into_response(),
    }
}
