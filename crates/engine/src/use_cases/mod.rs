//! Use cases - User story orchestration.
//!
//! Use cases load state through the storage port, apply domain operations
//! and persist the result.

pub mod calendar;

pub use calendar::{CalendarError, CalendarService, NewEvent};
