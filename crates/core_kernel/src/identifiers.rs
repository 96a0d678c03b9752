//! Strongly-typed identifiers for domain entities
//!
//! Identifiers are sequential positive integers assigned by the entity store.
//! Newtype wrappers keep a claim id from being passed where a lecturer id is
//! expected, while still rendering as the bare number users see on screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier that can be allocated from a monotonically increasing sequence
pub trait SequentialId: Copy + Ord {
    /// The first identifier handed out by an empty collection
    fn first() -> Self;

    /// The identifier that follows this one, if the id space is not exhausted
    fn successor(self) -> Option<Self>;
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an identifier from its raw value
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw value
            pub const fn value(&self) -> u32 {
                self.0
            }

            /// Returns the identifier prefix used in log labels
            pub fn prefix() -> &'static str {
                $prefix
            }

            /// Returns a prefixed label such as `CLM-7`
            pub fn label(&self) -> String {
                format!("{}-{}", $prefix, self.0)
            }
        }

        impl SequentialId for $name {
            fn first() -> Self {
                Self(1)
            }

            fn successor(self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accept both the bare number and the prefixed label
                let raw = s.trim();
                let raw = raw.strip_prefix(concat!($prefix, "-")).unwrap_or(raw);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

define_id!(LecturerId, "LEC");
define_id!(ClaimId, "CLM");
define_id!(StatusId, "STS");
define_id!(HoursWorkedId, "HRS");
define_id!(DocumentId, "DOC");

/// Tracks the highest identifier ever assigned in one collection
///
/// The next id is the high-water mark plus one, or [`SequentialId::first`]
/// when nothing has been assigned yet. Ids are never handed out twice, even
/// if records are later removed from the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence<T> {
    last: Option<T>,
}

impl<T: SequentialId> IdSequence<T> {
    /// Creates an empty sequence
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the id the next call to [`IdSequence::allocate`] would return
    pub fn peek(&self) -> Option<T> {
        match self.last {
            Some(last) => last.successor(),
            None => Some(T::first()),
        }
    }

    /// Allocates the next identifier, or `None` if the id space is exhausted
    pub fn allocate(&mut self) -> Option<T> {
        let next = self.peek()?;
        self.last = Some(next);
        Some(next)
    }

    /// Records an externally chosen id so it is never allocated again
    pub fn observe(&mut self, id: T) {
        if self.last.map_or(true, |last| id > last) {
            self.last = Some(id);
        }
    }
}

impl<T: SequentialId> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display_is_bare_number() {
        let id = ClaimId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.label(), "CLM-42");
    }

    #[test]
    fn test_id_parsing_accepts_prefix() {
        let parsed: ClaimId = "CLM-7".parse().unwrap();
        assert_eq!(parsed, ClaimId::new(7));

        let bare: LecturerId = "11".parse().unwrap();
        assert_eq!(bare, LecturerId::new(11));
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let mut seq = IdSequence::<ClaimId>::new();
        assert_eq!(seq.allocate(), Some(ClaimId::new(1)));
        assert_eq!(seq.allocate(), Some(ClaimId::new(2)));
    }

    #[test]
    fn test_sequence_continues_after_observed_max() {
        let mut seq = IdSequence::<HoursWorkedId>::new();
        seq.observe(HoursWorkedId::new(104));
        seq.observe(HoursWorkedId::new(101));
        assert_eq!(seq.allocate(), Some(HoursWorkedId::new(105)));
    }

    #[test]
    fn test_sequence_exhaustion() {
        let mut seq = IdSequence::<DocumentId>::new();
        seq.observe(DocumentId::new(u32::MAX));
        assert_eq!(seq.allocate(), None);
    }
}
