//! Job Board REST API
//!
//! This crate provides the Axum-based HTTP API for the job board:
//! signup and login, profile management, job postings gated by ownership,
//! and job applications.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{RouterOptions, create_router};
pub use state::{AppState, MetricsHandle};
