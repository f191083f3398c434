//! Job Board Database Layer
//!
//! This crate provides the persistence layer for the job board: user
//! credentials and profiles, job postings and applications, stored in
//! SQLite via sqlx.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::{Database, JobQuery};

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
