use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
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

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CalendarId);
define_id!(EventId);
define_id!(CategoryId);

// =============================================================================
// Id generation
// =============================================================================

/// Mints identifiers for newly created calendars, events and categories.
///
/// Passed explicitly into every function that creates a new identity so
/// callers and tests decide how ids look.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids of the form `<prefix>-<n>`, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate_id(&self) -> String {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CalendarId::new("cal-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cal-1\"");
        let back: CalendarId = serde_json::from_str("\"cal-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn blank_ids_report_empty() {
        assert!(EventId::new("  ").is_empty());
        assert!(!EventId::new("evt").is_empty());
    }

    #[test]
    fn sequential_generator_counts_up() {
        let ids = SequentialIdGenerator::new("cal");
        assert_eq!(ids.generate_id(), "cal-1");
        assert_eq!(ids.generate_id(), "cal-2");
    }

    #[test]
    fn uuid_generator_produces_distinct_uuids() {
        let ids = UuidIdGenerator::new();
        let a = ids.generate_id();
        let b = ids.generate_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn closures_are_generators() {
        let fixed = || "fixed".to_string();
        assert_eq!(fixed.generate_id(), "fixed");
    }
}
