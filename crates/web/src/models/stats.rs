//! Dashboard counters.

use serde::Deserialize;

/// Platform-wide totals shown on the admin console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_businesses: u64,
    pub pending_verifications: u64,
    pub total_customers: u64,
    pub total_riders: u64,
}

impl AdminStats {
    /// Every non-admin account on the platform.
    #[must_use]
    pub const fn total_users(&self) -> u64 {
        self.total_businesses + self.total_customers + self.total_riders
    }
}

/// Catalog totals for a single business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessStats {
    pub total_products: u64,
    pub active_products: u64,
    pub low_stock_products: u64,
}
