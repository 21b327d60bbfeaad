//! Calendars, their events and user-defined event categories

use serde::{Deserialize, Serialize};
use std::fmt;

use super::definition::CalendarDefinition;
use crate::error::DomainError;
use crate::ids::{CalendarId, CategoryId, EventId};

/// Longest allowed distance between an event's first and last day
pub const MAX_EVENT_SPAN: u64 = 60;
/// Maximum event title length
pub const MAX_EVENT_TITLE_LENGTH: usize = 200;
/// Maximum event description length
pub const MAX_EVENT_DESCRIPTION_LENGTH: usize = 2000;
/// Maximum calendar name length
pub const MAX_CALENDAR_NAME_LENGTH: usize = 100;
/// Maximum custom categories per calendar
pub const MAX_CUSTOM_CATEGORIES: usize = 20;
/// Accent color given to calendars created without one
pub const DEFAULT_CALENDAR_COLOR: &str = "#8b5cf6";

// ============================================================================
// CalendarPreset
// ============================================================================

/// Which factory a calendar's definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarPreset {
    DaggerheartDefault,
    GregorianLike,
    Harptos,
    Custom,
}

impl CalendarPreset {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalendarPreset::DaggerheartDefault => "Daggerheart Default",
            CalendarPreset::GregorianLike => "Gregorian-like",
            CalendarPreset::Harptos => "Calendar of Harptos",
            CalendarPreset::Custom => "Custom",
        }
    }

    /// Returns the serialized tag (e.g., "gregorian-like").
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarPreset::DaggerheartDefault => "daggerheart-default",
            CalendarPreset::GregorianLike => "gregorian-like",
            CalendarPreset::Harptos => "harptos",
            CalendarPreset::Custom => "custom",
        }
    }
}

impl fmt::Display for CalendarPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for CalendarPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daggerheart-default" | "daggerheart" | "default" => {
                Ok(CalendarPreset::DaggerheartDefault)
            }
            "gregorian-like" | "gregorian" => Ok(CalendarPreset::GregorianLike),
            "harptos" => Ok(CalendarPreset::Harptos),
            "custom" => Ok(CalendarPreset::Custom),
            other => Err(DomainError::parse(format!(
                "Unknown calendar preset: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// EventCategory
// ============================================================================

/// Event category: one of the built-in kinds or the id of a custom category
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Session,
    Holiday,
    Festival,
    Battle,
    Travel,
    Quest,
    Personal,
    #[default]
    Other,
    Custom(CategoryId),
}

impl EventCategory {
    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Session => "session",
            EventCategory::Holiday => "holiday",
            EventCategory::Festival => "festival",
            EventCategory::Battle => "battle",
            EventCategory::Travel => "travel",
            EventCategory::Quest => "quest",
            EventCategory::Personal => "personal",
            EventCategory::Other => "other",
            EventCategory::Custom(id) => id.as_str(),
        }
    }
}

impl From<String> for EventCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "session" => EventCategory::Session,
            "holiday" => EventCategory::Holiday,
            "festival" => EventCategory::Festival,
            "battle" => EventCategory::Battle,
            "travel" => EventCategory::Travel,
            "quest" => EventCategory::Quest,
            "personal" => EventCategory::Personal,
            "other" => EventCategory::Other,
            _ => EventCategory::Custom(CategoryId::new(s)),
        }
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Custom(id) => id.into(),
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CalendarEvent
// ============================================================================

/// Something that happens on one day, or across a bounded run of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub absolute_day: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_day: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: EventCategory,
}

impl CalendarEvent {
    pub fn new(id: EventId, absolute_day: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            absolute_day,
            end_day: None,
            title: title.into(),
            description: String::new(),
            category: EventCategory::default(),
        }
    }

    pub fn with_end_day(mut self, end_day: u64) -> Self {
        self.end_day = Some(end_day);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    /// True when the event covers more than its start day.
    pub fn is_multi_day(&self) -> bool {
        matches!(self.end_day, Some(end) if end > self.absolute_day)
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - the id is blank
    /// - the title is empty or longer than 200 characters
    /// - the description is longer than 2000 characters
    /// - `end_day` precedes `absolute_day` or the span exceeds 60 days
    /// - a custom category id is blank
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_empty() {
            return Err(DomainError::validation("Event ID cannot be empty"));
        }
        let title_len = self.title.chars().count();
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Event title cannot be empty"));
        }
        if title_len > MAX_EVENT_TITLE_LENGTH {
            return Err(DomainError::validation(format!(
                "Event title cannot exceed {} characters",
                MAX_EVENT_TITLE_LENGTH
            )));
        }
        if self.description.chars().count() > MAX_EVENT_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Event description cannot exceed {} characters",
                MAX_EVENT_DESCRIPTION_LENGTH
            )));
        }
        if let Some(end_day) = self.end_day {
            if end_day < self.absolute_day {
                return Err(DomainError::validation(format!(
                    "Event {} ends on day {} before it starts on day {}",
                    self.id, end_day, self.absolute_day
                )));
            }
            if end_day - self.absolute_day > MAX_EVENT_SPAN {
                return Err(DomainError::validation(format!(
                    "Event {} spans more than {} days",
                    self.id, MAX_EVENT_SPAN
                )));
            }
        }
        if let EventCategory::Custom(id) = &self.category {
            if id.is_empty() {
                return Err(DomainError::validation(
                    "Event category cannot be empty",
                ));
            }
        }
        Ok(())
    }
}

/// Validates each event and rejects repeated event ids.
pub fn validate_events<'a>(
    events: impl IntoIterator<Item = &'a CalendarEvent>,
) -> Result<(), DomainError> {
    let mut seen = std::collections::HashSet::new();
    for event in events {
        event.validate()?;
        if !seen.insert(&event.id) {
            return Err(DomainError::validation(format!(
                "Duplicate event ID: {}",
                event.id
            )));
        }
    }
    Ok(())
}

// ============================================================================
// CustomCategory
// ============================================================================

/// A user-defined event category with its own color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
}

impl CustomCategory {
    pub fn new(id: CategoryId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_empty() {
            return Err(DomainError::validation("Category ID cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Category name cannot be empty"));
        }
        if !is_hex_color(&self.color) {
            return Err(DomainError::validation(format!(
                "Category color must be a hex color like #abc or #aabbcc, got {}",
                self.color
            )));
        }
        Ok(())
    }
}

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6)
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// One named calendar with its own definition, clock and events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: CalendarId,
    pub name: String,
    pub color: String,
    pub preset: CalendarPreset,
    pub definition: CalendarDefinition,
    pub current_day: u64,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub epoch_label: String,
    #[serde(default)]
    pub era_name: String,
    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,
}

impl Calendar {
    /// Create a calendar at day 0 with no events.
    pub fn new(
        id: CalendarId,
        name: impl Into<String>,
        preset: CalendarPreset,
        definition: CalendarDefinition,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: DEFAULT_CALENDAR_COLOR.to_string(),
            preset,
            definition,
            current_day: 0,
            events: Vec::new(),
            epoch_label: String::new(),
            era_name: String::new(),
            custom_categories: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_era(mut self, epoch_label: impl Into<String>, era_name: impl Into<String>) -> Self {
        self.epoch_label = epoch_label.into();
        self.era_name = era_name.into();
        self
    }

    /// Looks up a custom category by id.
    pub fn custom_category(&self, id: &CategoryId) -> Option<&CustomCategory> {
        self.custom_categories.iter().find(|c| &c.id == id)
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` when any field, the definition, an
    /// event or a custom category breaks its rules, or when event ids repeat.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_empty() {
            return Err(DomainError::validation("Calendar ID cannot be empty"));
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
        if !is_hex_color(&self.color) {
            return Err(DomainError::validation(format!(
                "Calendar color must be a hex color like #abc or #aabbcc, got {}",
                self.color
            )));
        }
        self.definition.validate()?;

        validate_events(&self.events)?;

        if self.custom_categories.len() > MAX_CUSTOM_CATEGORIES {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} custom categories",
                MAX_CUSTOM_CATEGORIES
            )));
        }
        for category in &self.custom_categories {
            category.validate()?;
        }
        Ok(())
    }
}
