//! Core types for BizSphere.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use category::{CategoryError, ProductCategory};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use role::{Role, RoleError};
pub use status::{VerificationDecision, VerificationStatus};
