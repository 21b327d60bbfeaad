//! Calendar subsystem
//!
//! Key types:
//! - `CalendarDefinition` - months, weekdays, moons and seasons of one year
//! - `Calendar` - a named definition with its own current day and events
//! - `MultiCalendarEnvelope` - the persisted collection of calendars
//! - `PersistedCalendarState` - any stored version, upgraded via `parse_and_migrate_calendar`
//! - `CalendarExport` - the shareable export file

pub mod definition;
pub mod engine;
pub mod export;
pub mod migration;
pub mod model;
pub mod multi;
pub mod presets;

pub use definition::{
    CalendarDefinition, MonthDefinition, MoonDefinition, SeasonDefinition, MAX_MONTHS, MAX_MOONS,
    MAX_SEASONS, MAX_WEEKDAYS,
};
pub use engine::{
    advance_day, date_to_day_index, day_index_to_date, describe_day, events_on_day,
    get_days_in_month, get_moon_phase, get_moon_phase_name, get_month_start_day_index,
    get_season, get_weekday_name, group_events_by_day, total_days_in_year, DateParts,
    DayDescription, MoonPhase, MoonReading,
};
pub use export::{
    calendar_from_export, calendar_from_full_export, export_calendar, export_full_calendar,
    import_calendar_definition, import_full_calendar, CalendarExport, EXPORT_VERSION,
    MAX_IMPORT_BYTES,
};
pub use migration::{
    migrate_v1_to_v2, parse_and_migrate_calendar, safe_parse_and_migrate_calendar,
    CalendarStateV1, PersistedCalendarState, LEGACY_SCHEMA_VERSION, MIGRATED_CALENDAR_NAME,
};
pub use model::{
    is_hex_color, validate_events, Calendar, CalendarEvent, CalendarPreset, CustomCategory,
    EventCategory, DEFAULT_CALENDAR_COLOR, MAX_EVENT_SPAN,
};
pub use multi::{
    add_calendar, can_add_calendar, can_delete_calendar, delete_calendar, get_active_calendar,
    set_active_calendar, update_calendar_in_envelope, MultiCalendarEnvelope,
    CALENDAR_SCHEMA_VERSION, MAX_CALENDARS,
};
pub use presets::{
    calendar_from_preset, create_daggerheart_default, create_gregorian_like, create_harptos,
    preset_definition,
};
