//! BizSphere web front-end library.
//!
//! Server-rendered pages for the BizSphere marketplace. Every entity lives in
//! the remote BizSphere REST API; this crate keeps one bearer token per
//! browser session and renders role-specific dashboards from API data.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
