//! Account roles.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleError(pub String);

/// The kind of account a user holds.
///
/// The role decides which dashboard a user lands on: admins get the
/// verification console, owners the business view, everyone else the
/// generic dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper browsing and ordering from businesses.
    Customer,
    /// Delivery rider.
    Rider,
    /// Business owner managing a product catalog.
    Owner,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Roles a visitor may pick on the registration form.
    pub const SELF_SERVICE: [Self; 3] = [Self::Customer, Self::Owner, Self::Rider];

    /// Wire value used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Rider => "rider",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Rider => "Delivery Rider",
            Self::Owner => "Business Owner",
            Self::Admin => "Administrator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "rider" => Ok(Self::Rider),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            other => Err(RoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        let role: Role = serde_json::from_str("\"rider\"").unwrap();
        assert_eq!(role, Role::Rider);
    }

    #[test]
    fn test_role_from_str_round_trips_display() {
        for role in [Role::Customer, Role::Rider, Role::Owner, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_is_not_self_service() {
        assert!(!Role::SELF_SERVICE.contains(&Role::Admin));
    }
}
