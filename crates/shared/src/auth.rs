//! Token claims carried by verified bearer tokens.

use serde::{Deserialize, Serialize};

use crate::types::OwnerId;

/// Claims of an RS256 access token issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal that owns the caller's items.
    pub sub: String,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Returns the owner ID carried in the subject claim.
    #[must_use]
    pub fn owner_id(&self) -> OwnerId {
        OwnerId::new(self.sub.clone())
    }
}
