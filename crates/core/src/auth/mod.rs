//! Request authorization.
//!
//! This module provides:
//! - Bearer header parsing
//! - Token verification against the configured trust anchor
//! - Allow/Deny policy documents

mod authorizer;
mod policy;

pub use authorizer::{AuthError, Authorizer, extract_token};
pub use policy::{
    AuthorizerResponse, DENIED_PRINCIPAL, Effect, INVOKE_ACTION, POLICY_VERSION, PolicyDocument,
    PolicyStatement,
};
