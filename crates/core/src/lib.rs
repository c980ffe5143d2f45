//! BizSphere Core - Shared types library.
//!
//! Types shared by the BizSphere web front-end and its tests:
//! - entity IDs issued by the remote API
//! - accounts: [`Email`], [`Role`], [`VerificationStatus`]
//! - catalog: [`ProductCategory`], [`Price`]
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. The
//! remote BizSphere API owns every entity; these types describe what the
//! front-end reads and submits.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
