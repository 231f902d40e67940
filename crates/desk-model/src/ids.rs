//! Typed identifiers
//!
//! Every entity is keyed by a string id. Seed records use short literal ids
//! (`c1`, `t1`, ...); records created at runtime get a prefixed ULID so new
//! ids stay unique and sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh id
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, Ulid::new()))
            }

            /// Borrow the raw id
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Charity (tenant) identifier
    CharityId,
    "c"
);
string_id!(
    /// Project identifier
    ProjectId,
    "p"
);
string_id!(
    /// Task identifier
    TaskId,
    "t"
);
string_id!(
    /// Team member identifier
    UserId,
    "u"
);
string_id!(
    /// Mail message identifier
    MessageId,
    "msg-"
);
string_id!(
    /// Task activity identifier
    ActivityId,
    "act_"
);
