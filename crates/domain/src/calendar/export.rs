//! Calendar export files
//!
//! A definition export shares a calendar's structure and labels without its
//! events. A full export also carries the events. Neither carries the id or
//! current day; importing always mints a new calendar.

use serde::{Deserialize, Serialize};

use super::definition::CalendarDefinition;
use super::model::{
    validate_events, Calendar, CalendarEvent, CalendarPreset, CustomCategory,
    DEFAULT_CALENDAR_COLOR, MAX_CALENDAR_NAME_LENGTH, MAX_CUSTOM_CATEGORIES,
};
use crate::error::DomainError;
use crate::ids::{CalendarId, IdGenerator};

/// Version tag written into every export file
pub const EXPORT_VERSION: u32 = 1;
/// Largest import accepted, checked on the raw text before parsing
pub const MAX_IMPORT_BYTES: usize = 2 * 1024 * 1024;
const MAX_IMPORT_LABEL: &str = "2 MB";

/// Serialized calendar for sharing between campaigns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExport {
    pub export_version: u32,
    pub name: String,
    pub preset: CalendarPreset,
    pub definition: CalendarDefinition,
    #[serde(default)]
    pub epoch_label: String,
    #[serde(default)]
    pub era_name: String,
    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<CalendarEvent>>,
}

impl CalendarExport {
    fn from_calendar(calendar: &Calendar, include_events: bool) -> Self {
        Self {
            export_version: EXPORT_VERSION,
            name: calendar.name.clone(),
            preset: calendar.preset,
            definition: calendar.definition.clone(),
            epoch_label: calendar.epoch_label.clone(),
            era_name: calendar.era_name.clone(),
            custom_categories: calendar.custom_categories.clone(),
            events: include_events.then(|| calendar.events.clone()),
        }
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an unknown export version, an
    /// empty or overlong name, an invalid definition, category or event, or repeated event ids.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.export_version != EXPORT_VERSION {
            return Err(DomainError::validation(format!(
                "Unsupported export version {} (expected {})",
                self.export_version, EXPORT_VERSION
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Calendar name cannot be empty"));
        }
        if self.name.chars().count() > MAX_CALENDAR_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Calendar name cannot exceed {} characters",
                MAX_CALENDAR_NAME_LENGTH
            )));
        }
        self.definition.validate()?;
        if self.custom_categories.len() > MAX_CUSTOM_CATEGORIES {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} custom categories",
                MAX_CUSTOM_CATEGORIES
            )));
        }
        for category in &self.custom_categories {
            category.validate()?;
        }
        validate_events(self.events.iter().flatten())
    }
}

/// Definition-only export (no events).
pub fn export_calendar(calendar: &Calendar) -> Result<String, DomainError> {
    Ok(serde_json::to_string_pretty(&CalendarExport::from_calendar(
        calendar, false,
    ))?)
}

/// Export including every event.
pub fn export_full_calendar(calendar: &Calendar) -> Result<String, DomainError> {
    Ok(serde_json::to_string_pretty(&CalendarExport::from_calendar(
        calendar, true,
    ))?)
}

fn parse_export(text: &str) -> Result<CalendarExport, DomainError> {
    if text.len() > MAX_IMPORT_BYTES {
        return Err(DomainError::input_too_large(text.len(), MAX_IMPORT_LABEL));
    }
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| DomainError::parse(format!("Invalid JSON: {}", e)))?;
    let export: CalendarExport =
        serde_json::from_value(value).map_err(|e| DomainError::validation(e.to_string()))?;
    export.validate()?;
    Ok(export)
}

/// Reads a shared calendar definition. Events in the file are dropped.
///
/// # Errors
///
/// - `DomainError::InputTooLarge` above 2 MB
/// - `DomainError::Parse` for text that is not JSON
/// - `DomainError::Validation` for JSON that is not a valid export
pub fn import_calendar_definition(text: &str) -> Result<CalendarExport, DomainError> {
    let mut export = parse_export(text)?;
    export.events = None;
    tracing::debug!(name = %export.name, "Imported calendar definition");
    Ok(export)
}

/// Reads a full export; the file must carry an `events` list.
///
/// # Errors
///
/// Same as `import_calendar_definition`, plus `DomainError::Validation` when
/// the events list is missing.
pub fn import_full_calendar(text: &str) -> Result<CalendarExport, DomainError> {
    let export = parse_export(text)?;
    if export.events.is_none() {
        return Err(DomainError::validation(
            "Full calendar import requires an events list",
        ));
    }
    tracing::debug!(
        name = %export.name,
        events = export.events.as_ref().map_or(0, Vec::len),
        "Imported full calendar"
    );
    Ok(export)
}

fn new_calendar(
    export: &CalendarExport,
    color: Option<&str>,
    ids: &dyn IdGenerator,
) -> Calendar {
    Calendar {
        id: CalendarId::new(ids.generate_id()),
        name: export.name.clone(),
        color: color.unwrap_or(DEFAULT_CALENDAR_COLOR).to_string(),
        preset: export.preset,
        definition: export.definition.clone(),
        current_day: 0,
        events: Vec::new(),
        epoch_label: export.epoch_label.clone(),
        era_name: export.era_name.clone(),
        custom_categories: export.custom_categories.clone(),
    }
}

/// New calendar at day 0 with no events, built from an imported definition.
pub fn calendar_from_export(
    export: &CalendarExport,
    color: Option<&str>,
    ids: &dyn IdGenerator,
) -> Calendar {
    new_calendar(export, color, ids)
}

/// New calendar at day 0 that keeps the export's events.
pub fn calendar_from_full_export(
    export: &CalendarExport,
    color: Option<&str>,
    ids: &dyn IdGenerator,
) -> Calendar {
    Calendar {
        events: export.events.clone().unwrap_or_default(),
        ..new_calendar(export, color, ids)
    }
}
