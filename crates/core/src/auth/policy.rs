//! Access-policy documents returned by the authorizer.

use serde::{Deserialize, Serialize};

/// Policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The action every statement governs.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Principal reported on a Deny decision.
pub const DENIED_PRINCIPAL: &str = "user";

/// Whether a statement grants or refuses access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Access granted.
    Allow,
    /// Access refused.
    Deny,
}

/// One policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// The governed action.
    pub action: String,
    /// Allow or Deny.
    pub effect: Effect,
    /// The resource pattern the statement covers.
    pub resource: String,
}

/// A policy document with its statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version.
    pub version: String,
    /// Statements, all of which must allow for access to be granted.
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    fn invoke(effect: Effect) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                action: INVOKE_ACTION.to_string(),
                effect,
                resource: "*".to_string(),
            }],
        }
    }
}

/// The authorizer's decision: a principal and the policy that applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    /// Token subject on Allow; the placeholder principal on Deny.
    pub principal_id: String,
    /// The policy applying to the principal.
    pub policy_document: PolicyDocument,
}

impl AuthorizerResponse {
    /// Allow invocation for `principal_id`.
    #[must_use]
    pub fn allow(principal_id: impl Into<String>) -> Self {
        Self {
            principal_id: principal_id.into(),
            policy_document: PolicyDocument::invoke(Effect::Allow),
        }
    }

    /// Deny invocation under the placeholder principal.
    #[must_use]
    pub fn deny() -> Self {
        Self {
            principal_id: DENIED_PRINCIPAL.to_string(),
            policy_document: PolicyDocument::invoke(Effect::Deny),
        }
    }

    /// Returns true if every statement allows access.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        !self.policy_document.statement.is_empty()
            && self
                .policy_document
                .statement
                .iter()
                .all(|s| s.effect == Effect::Allow)
    }
}
