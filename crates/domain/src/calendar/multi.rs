//! Multi-calendar envelope
//!
//! The envelope is the persisted top-level value: a schema version, the id of
//! the calendar currently shown, and between one and `MAX_CALENDARS` calendars.
//! Every operation here borrows the envelope and returns a new one.

use serde::{Deserialize, Serialize};

use super::model::Calendar;
use crate::error::DomainError;
use crate::ids::CalendarId;

/// Version stamped on every envelope this crate writes
pub const CALENDAR_SCHEMA_VERSION: u32 = 2;
/// Maximum number of calendars in one envelope
pub const MAX_CALENDARS: usize = 10;

/// Current persisted calendar state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCalendarEnvelope {
    pub version: u32,
    pub active_calendar_id: CalendarId,
    pub calendars: Vec<Calendar>,
}

impl MultiCalendarEnvelope {
    /// Wraps a single calendar and makes it active.
    pub fn single(calendar: Calendar) -> Self {
        Self {
            version: CALENDAR_SCHEMA_VERSION,
            active_calendar_id: calendar.id.clone(),
            calendars: vec![calendar],
        }
    }

    pub fn calendar(&self, id: &CalendarId) -> Option<&Calendar> {
        self.calendars.iter().find(|c| &c.id == id)
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - the version is not `CALENDAR_SCHEMA_VERSION`
    /// - there are no calendars, or more than 10
    /// - two calendars share an id
    /// - any calendar is invalid
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.version != CALENDAR_SCHEMA_VERSION {
            return Err(DomainError::validation(format!(
                "Unsupported calendar schema version {} (expected {})",
                self.version, CALENDAR_SCHEMA_VERSION
            )));
        }
        if self.calendars.is_empty() {
            return Err(DomainError::validation(
                "Calendar state must contain at least one calendar",
            ));
        }
        if self.calendars.len() > MAX_CALENDARS {
            return Err(DomainError::validation(format!(
                "Calendar state cannot contain more than {} calendars",
                MAX_CALENDARS
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for calendar in &self.calendars {
            if !seen.insert(&calendar.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate calendar ID: {}",
                    calendar.id
                )));
            }
            calendar.validate()?;
        }
        Ok(())
    }
}

/// The active calendar, or `None` when the active id points nowhere.
pub fn get_active_calendar(envelope: &MultiCalendarEnvelope) -> Option<&Calendar> {
    envelope.calendar(&envelope.active_calendar_id)
}

/// Makes `id` the active calendar.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no calendar has that id.
pub fn set_active_calendar(
    envelope: &MultiCalendarEnvelope,
    id: &CalendarId,
) -> Result<MultiCalendarEnvelope, DomainError> {
    if envelope.calendar(id).is_none() {
        return Err(DomainError::not_found("Calendar", id.as_str()));
    }
    Ok(MultiCalendarEnvelope {
        active_calendar_id: id.clone(),
        ..envelope.clone()
    })
}

/// True while another calendar fits.
pub fn can_add_calendar(envelope: &MultiCalendarEnvelope) -> bool {
    envelope.calendars.len() < MAX_CALENDARS
}

/// False when only one calendar is left.
pub fn can_delete_calendar(envelope: &MultiCalendarEnvelope) -> bool {
    envelope.calendars.len() > 1
}

/// Appends a calendar. The active calendar is unchanged.
///
/// # Errors
///
/// - `DomainError::ContainerFull` once the envelope holds `MAX_CALENDARS`
/// - `DomainError::Constraint` if the calendar's id is already present
pub fn add_calendar(
    envelope: &MultiCalendarEnvelope,
    calendar: Calendar,
) -> Result<MultiCalendarEnvelope, DomainError> {
    if !can_add_calendar(envelope) {
        return Err(DomainError::container_full(
            envelope.calendars.len() as u32,
            MAX_CALENDARS as u32,
        ));
    }
    if envelope.calendar(&calendar.id).is_some() {
        return Err(DomainError::constraint(format!(
            "Calendar {} already exists",
            calendar.id
        )));
    }

    let mut next = envelope.clone();
    next.calendars.push(calendar);
    Ok(next)
}

/// Removes a calendar.
///
/// Absent ids are a no-op. Deleting the active calendar activates the first
/// remaining one.
///
/// # Errors
///
/// Returns `DomainError::Constraint` when `id` is the only calendar.
pub fn delete_calendar(
    envelope: &MultiCalendarEnvelope,
    id: &CalendarId,
) -> Result<MultiCalendarEnvelope, DomainError> {
    if envelope.calendar(id).is_none() {
        return Ok(envelope.clone());
    }
    if !can_delete_calendar(envelope) {
        return Err(DomainError::constraint("Cannot delete the only calendar"));
    }

    let calendars: Vec<Calendar> = envelope
        .calendars
        .iter()
        .filter(|c| &c.id != id)
        .cloned()
        .collect();

    let Some(first) = calendars.first() else {
        return Err(DomainError::constraint("Cannot delete the only calendar"));
    };
    let active_calendar_id = if &envelope.active_calendar_id == id {
        first.id.clone()
    } else {
        envelope.active_calendar_id.clone()
    };

    Ok(MultiCalendarEnvelope {
        version: envelope.version,
        active_calendar_id,
        calendars,
    })
}

/// Applies `updater` to the calendar with `id`; absent ids are a no-op.
pub fn update_calendar_in_envelope<F>(
    envelope: &MultiCalendarEnvelope,
    id: &CalendarId,
    updater: F,
) -> MultiCalendarEnvelope
where
    F: FnOnce(&Calendar) -> Calendar,
{
    let mut next = envelope.clone();
    if let Some(slot) = next.calendars.iter_mut().find(|c| &c.id == id) {
        *slot = updater(slot);
    }
    next
}
