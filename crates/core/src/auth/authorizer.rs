//! Bearer-token authorizer.

use thiserror::Error;
use todo_shared::{Claims, JwtError, TokenVerifier};
use tracing::{error, info};

use super::policy::AuthorizerResponse;

const BEARER_PREFIX: &str = "bearer ";

/// Why a request was not authorized.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header.
    #[error("authorization header missing")]
    MissingHeader,

    /// The header is not of the form `Bearer <token>`.
    #[error("authorization header malformed")]
    MalformedHeader,

    /// The token failed signature, expiry or claim checks.
    #[error("token invalid: {0}")]
    TokenInvalid(#[from] JwtError),
}

impl AuthError {
    /// Short label for logs; carries nothing from the token itself.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::TokenInvalid(JwtError::Expired) => "token_expired",
            Self::TokenInvalid(_) => "token_invalid",
        }
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::MissingHeader` for an absent or blank header and
/// `AuthError::MalformedHeader` when the scheme is not `bearer` or the token is empty.
pub fn extract_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(h) if !h.trim().is_empty() => h,
        _ => return Err(AuthError::MissingHeader),
    };

    let scheme = header
        .get(..BEARER_PREFIX.len())
        .ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(AuthError::MalformedHeader);
    }

    header[BEARER_PREFIX.len()..]
        .split_whitespace()
        .next()
        .ok_or(AuthError::MalformedHeader)
}

/// Turns an `Authorization` header into an Allow or Deny decision.
#[derive(Debug, Clone)]
pub struct Authorizer {
    verifier: TokenVerifier,
}

impl Authorizer {
    /// Create an authorizer over a token verifier.
    #[must_use]
    pub const fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Create an authorizer trusting a PEM certificate or public key.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidKey` if the PEM cannot be parsed.
    pub fn from_pem(pem: &str) -> Result<Self, JwtError> {
        TokenVerifier::from_pem(pem).map(Self::new)
    }

    /// Parse the header and verify its token.
    ///
    /// # Errors
    ///
    /// Returns the first [`AuthError`] encountered.
    pub fn verify(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = extract_token(header)?;
        Ok(self.verifier.verify(token)?)
    }

    /// Decide whether the request may proceed. Never fails: every error becomes Deny.
    #[must_use]
    pub fn authorize(&self, header: Option<&str>) -> AuthorizerResponse {
        match self.verify(header) {
            Ok(claims) => {
                info!(principal_id = %claims.sub, "User was authorized");
                AuthorizerResponse::allow(claims.sub)
            }
            Err(e) => {
                error!(kind = e.kind(), "User not authorized");
                AuthorizerResponse::deny()
            }
        }
    }
}
