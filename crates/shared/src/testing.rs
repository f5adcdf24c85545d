//! Token fixtures for tests across the workspace.
//!
//! Enabled for this crate's own tests and for dependents through the `testing` feature.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::json;

/// Self-signed certificate of the test issuer.
pub const CERTIFICATE_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/auth/certificate.pem"
));

/// Public key of the test issuer.
pub const PUBLIC_KEY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/auth/public_key.pem"
));

/// Private key matching [`CERTIFICATE_PEM`].
pub const SIGNING_KEY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/auth/signing_key.pem"
));

/// Private key unrelated to the trusted certificate.
pub const FOREIGN_KEY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/auth/foreign_key.pem"
));

fn sign_with<T: Serialize>(claims: &T, key_pem: &str) -> String {
    let key = EncodingKey::from_rsa_pem(key_pem.as_bytes()).expect("fixture key is valid");
    encode(&Header::new(Algorithm::RS256), claims, &key).expect("fixture token encodes")
}

fn claims_for(sub: &str, expires_in: Duration) -> serde_json::Value {
    let now = Utc::now();
    json!({
        "sub": sub,
        "iss": "https://todo-test-issuer/",
        "iat": now.timestamp(),
        "exp": (now + expires_in).timestamp(),
    })
}

/// Signs arbitrary claims with the trusted test key.
pub fn sign_claims<T: Serialize>(claims: &T) -> String {
    sign_with(claims, SIGNING_KEY_PEM)
}

/// Signs a token for `sub` with the trusted test key.
pub fn sign_token(sub: &str, expires_in: Duration) -> String {
    sign_claims(&claims_for(sub, expires_in))
}

/// Signs a token for `sub` with a key the verifier does not trust.
pub fn sign_foreign_token(sub: &str, expires_in: Duration) -> String {
    sign_with(&claims_for(sub, expires_in), FOREIGN_KEY_PEM)
}
