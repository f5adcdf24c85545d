//! Typed IDs for type-safe key references.
//!
//! Items are keyed by `(OwnerId, TodoId)`. Both are opaque strings on the wire and in
//! the table, so the wrappers only exist to stop the two halves of the key being swapped.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed string ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(
    OwnerId,
    "Identifier of the authenticated principal that owns a set of items (token subject)."
);
typed_id!(TodoId, "Identifier of a single to-do item within its owner's partition.");

impl TodoId {
    /// Generates a fresh random item ID (UUID v4, hyphenated lowercase).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
