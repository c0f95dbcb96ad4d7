//! Row identifiers
//!
//! Every persisted record is addressed by a store-assigned 64-bit integer.
//! The newtypes keep a report id from being passed where an attachment id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }
    };
}

define_id!(
    /// Identifier of a scam report
    ReportId
);
define_id!(
    /// Identifier of a file attached to a report
    AttachmentId
);
define_id!(
    /// Identifier of a link extracted from a report
    LinkId
);
define_id!(
    /// Identifier of an audit trail entry
    AuditEntryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ReportId = " 42 ".parse().unwrap();
        assert_eq!(id, ReportId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("abc".parse::<AttachmentId>(), Err(IdParseError::InvalidFormat));
    }
}
