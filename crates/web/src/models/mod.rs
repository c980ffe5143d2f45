//! Domain models read from and submitted to the BizSphere API.
//!
//! The API owns every entity. These types mirror its JSON (camelCase field
//! names, `_id` accepted for identifiers) and carry small display helpers
//! used by the templates.

pub mod business;
pub mod health;
pub mod product;
pub mod session;
pub mod stats;
pub mod user;

pub use business::Business;
pub use health::BackendHealth;
pub use product::{Product, ProductPayload, ProductStatusUpdate};
pub use session::{BearerToken, session_keys};
pub use stats::{AdminStats, BusinessStats};
pub use user::{AuthResponse, RegisterRequest, User};

use chrono::{DateTime, Utc};

/// Format an optional timestamp as a calendar date for tables.
pub(crate) fn format_date(at: Option<&DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |at| at.format("%d/%m/%Y").to_string())
}
