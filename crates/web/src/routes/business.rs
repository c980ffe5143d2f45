//! Business owner dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::Banner;
use crate::api::ProductApi;
use crate::filters;
use crate::middleware::AuthenticatedUser;
use crate::models::{BusinessStats, Product, User};
use crate::services::{CatalogRefresh, ProductManager};
use crate::state::AppState;

/// Owner dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusinessTab {
    #[default]
    Overview,
    Products,
    Orders,
    Deliveries,
}

impl BusinessTab {
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("products") => Self::Products,
            Some("orders") => Self::Orders,
            Some("deliveries") => Self::Deliveries,
            _ => Self::Overview,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Deliveries => "deliveries",
        }
    }
}

/// Business dashboard page.
#[derive(Template, WebTemplate)]
#[template(path = "business/index.html")]
pub struct BusinessTemplate {
    pub user: User,
    pub tab: &'static str,
    pub verified: bool,
    pub stats: BusinessStats,
    pub products: Vec<Product>,
    pub banner: Option<Banner>,
    /// Shown beside `banner` when the product list could not be loaded.
    pub load_error: Option<String>,
}

impl BusinessTemplate {
    fn new(user: User, tab: BusinessTab, banner: Option<Banner>) -> Self {
        Self {
            verified: user.is_business_verified(),
            user,
            tab: tab.as_str(),
            stats: BusinessStats::default(),
            products: Vec::new(),
            banner,
            load_error: None,
        }
    }

    /// Products tab showing an already fetched list.
    #[must_use]
    pub fn with_products(user: User, products: Vec<Product>, banner: Option<Banner>) -> Self {
        Self {
            products,
            ..Self::new(user, BusinessTab::Products, banner)
        }
    }

    /// Products tab after a change the API accepted, with the refetched list.
    #[must_use]
    pub fn after_change(user: User, refresh: CatalogRefresh, message: String) -> Self {
        Self {
            load_error: refresh
                .failure
                .map(|error| format!("Could not reload products: {}", error.user_message())),
            ..Self::with_products(user, refresh.products, Some(Banner::success(message)))
        }
    }
}

/// Render the business dashboard, fetching what the tab needs.
pub async fn render(
    state: &AppState,
    auth: AuthenticatedUser,
    tab: BusinessTab,
    banner: Option<Banner>,
) -> Response {
    let mut page = BusinessTemplate::new(auth.user, tab, banner);

    match tab {
        BusinessTab::Overview if page.verified => {
            match state.api().business_stats(&auth.token).await {
                Ok(stats) => page.stats = stats,
                Err(error) => tracing::warn!(%error, "Failed to fetch business stats"),
            }
        }
        BusinessTab::Products => {
            match ProductManager::new(state.api(), &auth.token).list().await {
                Ok(products) => page.products = products,
                Err(error) => {
                    tracing::warn!(%error, "Failed to load products");
                    page.load_error = Some("Failed to load products".to_string());
                }
            }
        }
        _ => {}
    }

    page.into_response()
}
