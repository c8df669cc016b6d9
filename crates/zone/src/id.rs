use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse a full UUID string. Short display ids are not accepted.
            pub fn parse(s: &str) -> Option<Self> {
                uuid::Uuid::parse_str(s).ok().map(Self)
            }

            /// Get the full UUID string.
            pub fn to_uuid_string(&self) -> String {
                self.0.to_string()
            }

            /// Create an id from a u128 (useful for tests).
            pub fn from_u128(value: u128) -> Self {
                Self(uuid::Uuid::from_u128(value))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.0.to_string()[..8])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(
    /// Unique identifier for a zone. Stable across reordering.
    ZoneId
);

define_id!(
    /// Unique identifier for a vertex. Stable across insertions before it.
    PointId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_short_form() {
        let id = ZoneId::from_u128(0x1234_5678_0000_0000_0000_0000_0000_0000);
        assert_eq!(id.to_string(), "12345678");
    }

    #[test]
    fn parse_roundtrips_full_uuid() {
        let id = PointId::new();
        assert_eq!(PointId::parse(&id.to_uuid_string()), Some(id));
        assert_eq!(PointId::parse("not-a-uuid"), None);
    }
}
