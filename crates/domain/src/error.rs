//! Unified error types for the domain layer
//!
//! Every structural failure in the calendar subsystem (schema violations,
//! capacity limits, unknown identifiers, malformed import text) is reported
//! through `DomainError`. Low-level date arithmetic never fails and never
//! produces one of these.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (malformed JSON input)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Container is at capacity
    #[error("Container full: {current}/{max} items")]
    ContainerFull { current: u32, max: u32 },

    /// Raw input rejected before parsing
    #[error("Input too large: {size} bytes exceeds the {limit_label} limit")]
    InputTooLarge {
        size: usize,
        limit_label: &'static str,
    },
}

impl DomainError {
    /// Creates a validation error for schema and invariant violations.
    ///
    /// # Example
    /// ```ignore
    /// if title.is_empty() {
    ///     return Err(DomainError::validation("Event title cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for text that is not well-formed JSON.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a container full error
    pub fn container_full(current: u32, max: u32) -> Self {
        Self::ContainerFull { current, max }
    }

    /// Create an oversized input error
    pub fn input_too_large(size: usize, limit_label: &'static str) -> Self {
        Self::InputTooLarge { size, limit_label }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            Self::Parse(format!("Invalid JSON: {}", err))
        } else {
            Self::Validation(err.to_string())
        }
    }
}
