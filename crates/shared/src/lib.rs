//! Shared types, errors, and configuration for the todo backend.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for the `(owner, item)` composite key
//! - Application-wide error types
//! - Configuration management
//! - Bearer token claims and RS256 verification

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtError, TokenVerifier};
pub use types::{OwnerId, TodoId};
