//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PartyId` where a `DonationId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

typed_id!(PartyId, "Unique identifier for a party (contact).");
typed_id!(AddressId, "Unique identifier for a postal address.");
typed_id!(DonationId, "Unique identifier for a donation.");
typed_id!(DonationTypeId, "Unique identifier for a donation type.");
typed_id!(DonorTypeId, "Unique identifier for a donor type.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = DonationId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(DonationId::from(uuid), id);
    }

    #[test]
    fn test_typed_id_display_and_parse() {
        let id = PartyId::new();
        let parsed = PartyId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_typed_id_parse_invalid() {
        assert!(DonationId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_typed_id_ordering_follows_uuid() {
        let low = DonorTypeId::from_uuid(Uuid::from_u128(1));
        let high = DonorTypeId::from_uuid(Uuid::from_u128(2));
        assert!(low < high);
    }
}
