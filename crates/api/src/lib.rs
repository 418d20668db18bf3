//! HTTP API layer for campus.
//!
//! This crate provides the REST API consumed by the dashboard shell:
//!
//! - **Endpoints**: per-resource routers under `/api`
//! - **Extractors**: authenticated-user extraction
//! - **Middleware**: bearer-token session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
