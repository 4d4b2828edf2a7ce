use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Trait for identifier types rendered into `<option value=...>` by the server.
///
/// Identifiers are opaque: the client never interprets them, it only
/// compares and echoes them back.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + fmt::Debug
{
    /// Convert the ID to its wire form
    fn as_string(&self) -> String;

    /// Build the ID from a form value. Empty values are placeholders, not IDs.
    fn from_string(s: &str) -> Result<Self, String>;
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Parse a select value, treating the empty placeholder as `None`.
            pub fn from_form_value(value: &str) -> Option<Self> {
                Self::from_string(value).ok()
            }
        }

        impl AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.clone()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(format!("Empty {}", stringify!($name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Product primary key as rendered in the product select
    ProductId
);
opaque_id!(
    /// Customer primary key, used to scope the price table
    CustomerId
);
opaque_id!(
    /// Country, region or township key in the address cascade
    LocationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_rejects_placeholder() {
        assert!(ProductId::from_string("").is_err());
        assert!(ProductId::from_string("   ").is_err());
        assert_eq!(ProductId::from_form_value(""), None);
    }

    #[test]
    fn test_from_string_trims() {
        let id = CustomerId::from_string(" 42 ").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.as_string(), "42");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("P1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"P1\"");
        let back: ProductId = serde_json::from_str("\"P1\"").unwrap();
        assert_eq!(back, id);
    }
}
