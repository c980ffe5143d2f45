//! Front-end services sitting between route handlers and the API client.
//!
//! - `token_store` - Where the bearer token lives (session or memory)
//! - `session` - Session context: current user, login, registration, logout
//! - `admin` - Admin console loading pipeline and business verification
//! - `products` - Product form coercion and catalog mutations

pub mod admin;
pub mod products;
pub mod session;
pub mod token_store;

pub use admin::{AdminLoad, AdminSnapshot, AdminStep, SnapshotFailure, VerifyError};
pub use products::{CatalogRefresh, ProductForm, ProductManager};
pub use session::{SessionContext, SessionError, SessionState};
pub use token_store::{MemoryTokenStore, SessionTokenStore, TokenStore};
