//! Job Board Authentication and Authorization
//!
//! This crate issues and verifies the signed session tokens that carry a
//! caller's identity, hashes passwords, and decides whether an identity may
//! modify a resource it does not own.

pub mod error;
pub mod gate;
pub mod jwt;
pub mod password;

pub use error::AuthError;
pub use gate::{AuthUser, authenticate, authenticate_optional, bearer_token};
pub use jwt::{Claims, IssuedToken, JwtManager};
pub use password::{hash_password, verify_password};
