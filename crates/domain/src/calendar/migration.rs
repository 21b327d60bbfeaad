//! Persisted calendar state versions and the v1 → v2 upgrade
//!
//! Version 1 stored a single calendar with its fields at the top level.
//! Version 2 is the `MultiCalendarEnvelope`. Stored blobs are told apart by
//! their numeric `version` field before being decoded into the matching shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::definition::CalendarDefinition;
use super::model::{
    validate_events, Calendar, CalendarEvent, CalendarPreset, DEFAULT_CALENDAR_COLOR,
};
use super::multi::{MultiCalendarEnvelope, CALENDAR_SCHEMA_VERSION};
use crate::error::DomainError;
use crate::ids::{CalendarId, IdGenerator};

/// Version tag of the legacy single-calendar shape
pub const LEGACY_SCHEMA_VERSION: u32 = 1;
/// Name given to the calendar created from legacy state
pub const MIGRATED_CALENDAR_NAME: &str = "Main Calendar";

/// Legacy single-calendar state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarStateV1 {
    pub version: u32,
    pub preset: CalendarPreset,
    pub definition: CalendarDefinition,
    pub current_day: u64,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub epoch_label: String,
    #[serde(default)]
    pub era_name: String,
}

impl CalendarStateV1 {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.version != LEGACY_SCHEMA_VERSION {
            return Err(DomainError::validation(format!(
                "Expected calendar schema version {}, got {}",
                LEGACY_SCHEMA_VERSION, self.version
            )));
        }
        self.definition.validate()?;
        validate_events(&self.events)
    }
}

/// Any calendar state this crate can read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedCalendarState {
    V1(CalendarStateV1),
    V2(MultiCalendarEnvelope),
}

impl PersistedCalendarState {
    /// Decodes and validates a stored blob, dispatching on its `version`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the value is not an object, has
    /// no numeric version, carries an unknown version, or fails the schema of
    /// its version.
    pub fn from_value(raw: &Value) -> Result<Self, DomainError> {
        let version = raw
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                DomainError::validation("Calendar state is missing a numeric version")
            })?;

        match version {
            v if v == LEGACY_SCHEMA_VERSION as u64 => {
                let state: CalendarStateV1 = serde_json::from_value(raw.clone())
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                state.validate()?;
                Ok(Self::V1(state))
            }
            v if v == CALENDAR_SCHEMA_VERSION as u64 => {
                let envelope: MultiCalendarEnvelope = serde_json::from_value(raw.clone())
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                envelope.validate()?;
                Ok(Self::V2(envelope))
            }
            other => Err(DomainError::validation(format!(
                "Unsupported calendar schema version {}",
                other
            ))),
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Self::V1(state) => state.version,
            Self::V2(envelope) => envelope.version,
        }
    }

    /// Brings any version up to the current envelope.
    pub fn into_current(self, ids: &dyn IdGenerator) -> MultiCalendarEnvelope {
        match self {
            Self::V1(state) => migrate_v1_to_v2(state, ids),
            Self::V2(envelope) => envelope,
        }
    }
}

/// Wraps legacy state in an envelope holding a single "Main Calendar".
pub fn migrate_v1_to_v2(v1: CalendarStateV1, ids: &dyn IdGenerator) -> MultiCalendarEnvelope {
    let calendar = Calendar {
        id: CalendarId::new(ids.generate_id()),
        name: MIGRATED_CALENDAR_NAME.to_string(),
        color: DEFAULT_CALENDAR_COLOR.to_string(),
        preset: v1.preset,
        definition: v1.definition,
        current_day: v1.current_day,
        events: v1.events,
        epoch_label: v1.epoch_label,
        era_name: v1.era_name,
        custom_categories: Vec::new(),
    };
    MultiCalendarEnvelope::single(calendar)
}

/// Validates stored state and returns it as a current envelope.
///
/// # Errors
///
/// Returns `DomainError::Validation` when `raw` matches neither version.
pub fn parse_and_migrate_calendar(
    raw: &Value,
    ids: &dyn IdGenerator,
) -> Result<MultiCalendarEnvelope, DomainError> {
    let state = PersistedCalendarState::from_value(raw)?;
    if let PersistedCalendarState::V1(_) = state {
        tracing::info!("Migrating calendar state from version 1 to {}", CALENDAR_SCHEMA_VERSION);
    }
    Ok(state.into_current(ids))
}

/// Like `parse_and_migrate_calendar`, but logs a warning and returns `None`
/// for unreadable state.
pub fn safe_parse_and_migrate_calendar(
    raw: &Value,
    ids: &dyn IdGenerator,
) -> Option<MultiCalendarEnvelope> {
    match parse_and_migrate_calendar(raw, ids) {
        Ok(envelope) => Some(envelope),
        Err(error) => {
            tracing::warn!(error = %error, "Discarding unreadable calendar state");
            None
        }
    }
}
