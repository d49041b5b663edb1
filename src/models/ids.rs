//! Strongly-typed ID wrappers for all record types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! record types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(BudgetId, "bud-");
define_id!(SavingsId, "sav-");

/// Whether `input` looks like the short display form of some id
/// (prefix plus the first eight hex digits).
pub fn matches_short_id(full: &impl fmt::Display, input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input.len() >= 12 && full.to_string() == input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = BudgetId::new();
        let display = id.to_string();
        assert!(display.starts_with("bud-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = SavingsId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: SavingsId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ExpenseId = format!("exp-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_id() {
        let id = BudgetId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(matches_short_id(&id, "bud-550e8400"));
        assert!(matches_short_id(&id, "BUD-550E8400"));
        assert!(!matches_short_id(&id, "bud-550e"));
        assert!(!matches_short_id(&id, "exp-550e8400"));
    }
}
