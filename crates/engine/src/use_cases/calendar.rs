//! Calendar use cases.
//!
//! Loads and persists a campaign's calendar envelope and applies the
//! envelope operations on top of it:
//! - Advancing the active calendar's clock
//! - Adding, switching and deleting calendars
//! - Recording events
//! - Exporting and importing calendar definitions

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use heartkeep_domain::{
    add_calendar, advance_day, calendar_from_export, calendar_from_full_export,
    calendar_from_preset, create_daggerheart_default, delete_calendar, export_calendar,
    export_full_calendar, get_active_calendar, import_calendar_definition, import_full_calendar,
    safe_parse_and_migrate_calendar, set_active_calendar, update_calendar_in_envelope, Calendar,
    CalendarEvent, CalendarId, CalendarPreset, DomainError, EventCategory, EventId,
    MultiCalendarEnvelope, LEGACY_SCHEMA_VERSION,
};

use crate::infrastructure::ports::{IdGenerator, StorageError, StoragePort};

/// Storage key for a campaign's calendar state.
pub fn storage_key(campaign: &str) -> String {
    format!("calendar:{}", campaign)
}

/// Fields supplied when recording an event; the id is generated.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub absolute_day: u64,
    pub end_day: Option<u64>,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
}

impl NewEvent {
    pub fn new(absolute_day: u64, title: impl Into<String>) -> Self {
        Self {
            absolute_day,
            end_day: None,
            title: title.into(),
            description: String::new(),
            category: EventCategory::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("No active calendar")]
    NoActiveCalendar,
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct CalendarService {
    storage: Arc<dyn StoragePort>,
    ids: Arc<dyn IdGenerator>,
}

impl CalendarService {
    pub fn new(storage: Arc<dyn StoragePort>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { storage, ids }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load the campaign's envelope.
    ///
    /// Missing or unreadable state yields a fresh Daggerheart envelope without
    /// touching storage. Legacy state is upgraded and written back.
    pub fn load(&self, campaign: &str) -> Result<MultiCalendarEnvelope, CalendarError> {
        let key = storage_key(campaign);
        let Some(text) = self.storage.read(&key)? else {
            tracing::debug!(campaign, "No stored calendar, using default");
            return Ok(create_daggerheart_default(self.ids.as_ref()));
        };

        let raw: Value = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(campaign, error = %error, "Stored calendar is not valid JSON, using default");
                return Ok(create_daggerheart_default(self.ids.as_ref()));
            }
        };

        let Some(envelope) = safe_parse_and_migrate_calendar(&raw, self.ids.as_ref()) else {
            return Ok(create_daggerheart_default(self.ids.as_ref()));
        };

        let was_legacy =
            raw.get("version").and_then(Value::as_u64) == Some(u64::from(LEGACY_SCHEMA_VERSION));
        if was_legacy {
            self.save(campaign, &envelope)?;
            tracing::info!(campaign, "Persisted migrated calendar state");
        }

        Ok(envelope)
    }

    /// Validate and persist the campaign's envelope.
    pub fn save(
        &self,
        campaign: &str,
        envelope: &MultiCalendarEnvelope,
    ) -> Result<(), CalendarError> {
        envelope.validate()?;
        let text = serde_json::to_string(envelope)?;
        self.storage.write(&storage_key(campaign), &text)?;
        tracing::debug!(
            campaign,
            calendars = envelope.calendars.len(),
            "Saved calendar state"
        );
        Ok(())
    }

    // =========================================================================
    // Calendar management
    // =========================================================================

    /// Move the active calendar's clock by `delta` days, clamping at day 0.
    pub fn advance_day(&self, campaign: &str, delta: i64) -> Result<Calendar, CalendarError> {
        let envelope = self.load(campaign)?;
        let active = active_calendar(&envelope)?;
        let from = active.current_day;
        let to = advance_day(from, delta);

        let next = update_calendar_in_envelope(&envelope, &active.id, |calendar| Calendar {
            current_day: to,
            ..calendar.clone()
        });
        self.save(campaign, &next)?;

        tracing::info!(campaign, calendar = %active.id, from, to, "Advanced calendar");
        Ok(active_calendar(&next)?.clone())
    }

    /// Add a calendar built from `preset`. The active calendar is unchanged.
    pub fn add_preset_calendar(
        &self,
        campaign: &str,
        preset: CalendarPreset,
    ) -> Result<Calendar, CalendarError> {
        let envelope = self.load(campaign)?;
        let calendar = calendar_from_preset(preset, self.ids.as_ref());
        let next = add_calendar(&envelope, calendar.clone())?;
        self.save(campaign, &next)?;

        tracing::info!(campaign, calendar = %calendar.id, preset = preset.as_str(), "Added calendar");
        Ok(calendar)
    }

    pub fn switch_calendar(
        &self,
        campaign: &str,
        id: &CalendarId,
    ) -> Result<Calendar, CalendarError> {
        let envelope = self.load(campaign)?;
        let next = set_active_calendar(&envelope, id)?;
        self.save(campaign, &next)?;
        Ok(active_calendar(&next)?.clone())
    }

    /// Delete a calendar. Unknown ids leave the stored state untouched.
    pub fn delete_calendar(
        &self,
        campaign: &str,
        id: &CalendarId,
    ) -> Result<MultiCalendarEnvelope, CalendarError> {
        let envelope = self.load(campaign)?;
        if envelope.calendar(id).is_none() {
            return Ok(envelope);
        }
        let next = delete_calendar(&envelope, id)?;
        self.save(campaign, &next)?;

        tracing::info!(campaign, calendar = %id, active = %next.active_calendar_id, "Deleted calendar");
        Ok(next)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Record an event on the active calendar.
    ///
    /// Custom categories must already be defined on that calendar.
    pub fn add_event(
        &self,
        campaign: &str,
        new_event: NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        let envelope = self.load(campaign)?;
        let active = active_calendar(&envelope)?;

        if let EventCategory::Custom(category_id) = &new_event.category {
            if active.custom_category(category_id).is_none() {
                return Err(DomainError::not_found("Category", category_id.as_str()).into());
            }
        }

        let mut event = CalendarEvent::new(
            EventId::new(self.ids.generate_id()),
            new_event.absolute_day,
            new_event.title,
        )
        .with_description(new_event.description)
        .with_category(new_event.category);
        if let Some(end_day) = new_event.end_day {
            event = event.with_end_day(end_day);
        }
        event.validate()?;

        let next = update_calendar_in_envelope(&envelope, &active.id, |calendar| {
            let mut updated = calendar.clone();
            updated.events.push(event.clone());
            updated
        });
        self.save(campaign, &next)?;

        tracing::info!(campaign, calendar = %active.id, event = %event.id, day = event.absolute_day, "Added event");
        Ok(event)
    }

    // =========================================================================
    // Export / import
    // =========================================================================

    /// Export the active calendar as pretty JSON, with events when `full`.
    pub fn export_active(&self, campaign: &str, full: bool) -> Result<String, CalendarError> {
        let envelope = self.load(campaign)?;
        let active = active_calendar(&envelope)?;
        let text = if full {
            export_full_calendar(active)?
        } else {
            export_calendar(active)?
        };
        Ok(text)
    }

    /// Import an export file as a new calendar at day 0.
    ///
    /// With `full`, the file must carry events and they are kept; otherwise
    /// only the definition is taken.
    pub fn import_calendar(
        &self,
        campaign: &str,
        text: &str,
        full: bool,
    ) -> Result<Calendar, CalendarError> {
        let envelope = self.load(campaign)?;
        let calendar = if full {
            let export = import_full_calendar(text)?;
            calendar_from_full_export(&export, None, self.ids.as_ref())
        } else {
            let export = import_calendar_definition(text)?;
            calendar_from_export(&export, None, self.ids.as_ref())
        };
        let next = add_calendar(&envelope, calendar.clone())?;
        self.save(campaign, &next)?;

        tracing::info!(campaign, calendar = %calendar.id, name = %calendar.name, "Imported calendar");
        Ok(calendar)
    }
}

fn active_calendar(envelope: &MultiCalendarEnvelope) -> Result<&Calendar, CalendarError> {
    get_active_calendar(envelope).ok_or(CalendarError::NoActiveCalendar)
}
