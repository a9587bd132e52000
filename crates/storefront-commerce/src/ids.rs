//! Newtype IDs for type-safe identifiers.
//!
//! The backend is loose about identifier types: SKU ids arrive as strings
//! from some endpoints and as numbers from others. Every id accepts either
//! on deserialization and always serializes as a string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire form of an identifier before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
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

define_id!(
    /// Purchasable variant identifier.
    SkuId
);
define_id!(
    /// Vendor promotion attached to a cart line.
    PromotionId
);
define_id!(
    /// Shipping method offered at checkout.
    ShipmentOptionId
);
define_id!(
    /// Payment method offered at checkout.
    PaymentOptionId
);
define_id!(
    /// Order created by the backend.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = SkuId::new("sku-123");
        assert_eq!(id.as_str(), "sku-123");
        assert_eq!(format!("{}", id), "sku-123");
    }

    #[test]
    fn test_id_accepts_numbers_on_the_wire() {
        let id: SkuId = serde_json::from_str("42").unwrap();
        assert_eq!(id, SkuId::new("42"));

        let id: SkuId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderId::new("ord-9")).unwrap();
        assert_eq!(json, "\"ord-9\"");
    }
}
