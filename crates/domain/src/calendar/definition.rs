//! Calendar structure value objects
//!
//! A `CalendarDefinition` describes one year of a (possibly fantasy) calendar:
//! its months in order, the weekday cycle, any moons and the season boundaries.
//! Month lengths are arbitrary, so a year is simply the concatenation of all
//! months; short "intercalary" months of a single day are ordinary months here.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum number of months in a definition
pub const MAX_MONTHS: usize = 50;
/// Maximum number of weekday names
pub const MAX_WEEKDAYS: usize = 20;
/// Maximum number of moons
pub const MAX_MOONS: usize = 10;
/// Maximum number of seasons
pub const MAX_SEASONS: usize = 20;
/// Maximum length of any display name inside a definition
pub const MAX_NAME_LENGTH: usize = 100;

// ============================================================================
// MonthDefinition
// ============================================================================

/// Configuration for a single month in a calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDefinition {
    /// Month name (e.g., "Hammer", "January")
    pub name: String,
    /// Number of days in this month
    pub days: u32,
}

impl MonthDefinition {
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }
}

// ============================================================================
// MoonDefinition
// ============================================================================

/// A moon with its own phase cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonDefinition {
    pub name: String,
    /// Length of a full new-to-new cycle in days
    pub cycle_days: u32,
    /// Shift applied to the absolute day before computing the phase
    #[serde(default)]
    pub offset: i64,
}

impl MoonDefinition {
    pub fn new(name: impl Into<String>, cycle_days: u32, offset: i64) -> Self {
        Self {
            name: name.into(),
            cycle_days,
            offset,
        }
    }
}

// ============================================================================
// SeasonDefinition
// ============================================================================

/// A season beginning on a given (0-indexed) month and day of month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDefinition {
    pub name: String,
    pub start_month: usize,
    pub start_day: u32,
}

impl SeasonDefinition {
    pub fn new(name: impl Into<String>, start_month: usize, start_day: u32) -> Self {
        Self {
            name: name.into(),
            start_month,
            start_day,
        }
    }
}

// ============================================================================
// CalendarDefinition
// ============================================================================

/// Full calendar structure: months, weekdays, moons and seasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDefinition {
    pub months: Vec<MonthDefinition>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub moons: Vec<MoonDefinition>,
    #[serde(default)]
    pub seasons: Vec<SeasonDefinition>,
}

impl CalendarDefinition {
    pub fn new(
        months: Vec<MonthDefinition>,
        weekdays: Vec<String>,
        moons: Vec<MoonDefinition>,
        seasons: Vec<SeasonDefinition>,
    ) -> Self {
        Self {
            months,
            weekdays,
            moons,
            seasons,
        }
    }

    /// Checks the structural rules every stored or imported definition obeys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - there are no months, or more than 50
    /// - a month has an empty name or zero days
    /// - there are more than 20 weekdays, 10 moons or 20 seasons
    /// - a moon has a zero-length cycle
    /// - a season starts outside the month table
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.months.is_empty() {
            return Err(DomainError::validation(
                "Calendar must have at least one month",
            ));
        }
        if self.months.len() > MAX_MONTHS {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} months",
                MAX_MONTHS
            )));
        }
        for (index, month) in self.months.iter().enumerate() {
            validate_name("Month", &month.name)?;
            if month.days == 0 {
                return Err(DomainError::validation(format!(
                    "Month {} ({}) must have at least one day",
                    index, month.name
                )));
            }
        }

        if self.weekdays.len() > MAX_WEEKDAYS {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} weekdays",
                MAX_WEEKDAYS
            )));
        }
        for weekday in &self.weekdays {
            validate_name("Weekday", weekday)?;
        }

        if self.moons.len() > MAX_MOONS {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} moons",
                MAX_MOONS
            )));
        }
        for moon in &self.moons {
            validate_name("Moon", &moon.name)?;
            if moon.cycle_days == 0 {
                return Err(DomainError::validation(format!(
                    "Moon {} must have a cycle of at least one day",
                    moon.name
                )));
            }
        }

        if self.seasons.len() > MAX_SEASONS {
            return Err(DomainError::validation(format!(
                "Calendar cannot have more than {} seasons",
                MAX_SEASONS
            )));
        }
        for season in &self.seasons {
            validate_name("Season", &season.name)?;
            let Some(month) = self.months.get(season.start_month) else {
                return Err(DomainError::validation(format!(
                    "Season {} starts in month {}, which does not exist",
                    season.name, season.start_month
                )));
            };
            if season.start_day >= month.days {
                return Err(DomainError::validation(format!(
                    "Season {} starts on day {} but {} has only {} days",
                    season.name, season.start_day, month.name, month.days
                )));
            }
        }

        Ok(())
    }
}

fn validate_name(kind: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} name cannot exceed {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
