//! Newtype ids for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different id types,
//! e.g., passing a `ProductId` where a `BasketItemId` is expected. Every id
//! is assigned once at construction and never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype id structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an id from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh globally-unique id.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "prod");
define_id!(CategoryId, "cat");
define_id!(BasketId, "bsk");
define_id!(BasketItemId, "itm");

/// Generate a prefixed random id from 18 random bytes.
fn generate_id(prefix: &str) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 18] = rand::thread_rng().gen();
    format!("{}_{}", prefix, URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation_is_unique() {
        let id1 = BasketId::generate();
        let id2 = BasketId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_id_carries_prefix() {
        let id = BasketItemId::generate();
        assert!(id.as_str().starts_with("itm_"));
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
    }

    #[test]
    fn test_id_display() {
        let id = CategoryId::new("cat-789");
        assert_eq!(format!("{}", id), "cat-789");
    }

    #[test]
    fn test_id_equality() {
        let id1 = ProductId::new("same");
        let id2 = ProductId::new("same");
        let id3 = ProductId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_serialization() {
        let id = BasketId::new("bsk-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""bsk-1""#);

        let back: BasketId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
