//! # tourhub-api
//!
//! HTTP API layer for TourHub built on Axum.
//!
//! Provides the REST endpoints, the access-control middleware stages
//! (protect, restrict-to, soft-identify), extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
