//! Bearer token verification.
//!
//! Tokens are RS256-signed by the identity provider. The trust anchor is a PEM
//! document (an X.509 certificate or a bare public key) supplied by configuration,
//! parsed once at startup and held immutably afterwards.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use crate::auth::Claims;

/// Errors that can occur during token verification.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The configured trust anchor could not be parsed.
    #[error("invalid verification key: {0}")]
    InvalidKey(String),

    /// Token decoding failed (bad signature, wrong algorithm, malformed claims).
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Verifies bearer tokens against a fixed RS256 trust anchor.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenVerifier {
    /// The single accepted signing algorithm.
    pub const ALGORITHM: Algorithm = Algorithm::RS256;

    /// Creates a verifier from a PEM-encoded certificate or RSA public key.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidKey` if the PEM cannot be parsed as an RSA key.
    pub fn from_pem(pem: &str) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);
        // Audience is not part of the contract; tokens carrying one are still accepted.
        validation.validate_aud = false;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` for any other signature or claim failure.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, CERTIFICATE_PEM, PUBLIC_KEY_PEM};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    #[test]
    fn test_verify_token_signed_by_trusted_key() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        let token = testing::sign_token("auth0|u1", Duration::hours(1));

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "auth0|u1");
    }

    #[test]
    fn test_verifier_accepts_bare_public_key() {
        let verifier = TokenVerifier::from_pem(PUBLIC_KEY_PEM).unwrap();
        let token = testing::sign_token("auth0|u1", Duration::hours(1));

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        let token = testing::sign_token("auth0|u1", Duration::hours(-2));

        assert!(matches!(verifier.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_signed_by_foreign_key() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        let token = testing::sign_foreign_token("auth0|u1", Duration::hours(1));

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_hmac_token_rejected() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &json!({ "sub": "auth0|u1", "exp": exp }),
            &EncodingKey::from_secret(b"shared-secret"),
        )
        .unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_token_without_subject_rejected() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = testing::sign_claims(&json!({ "exp": exp, "iat": 0 }));

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = TokenVerifier::from_pem(CERTIFICATE_PEM).unwrap();
        assert!(verifier.verify("invalid.token.here").is_err());
    }

    #[test]
    fn test_invalid_pem_rejected() {
        let result = TokenVerifier::from_pem("-----BEGIN CERTIFICATE-----\nnope\n");
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }
}
