//! Day-index arithmetic
//!
//! Every date is stored as an absolute day index counted from day 0 of year 0.
//! These functions resolve that index against a `CalendarDefinition`: year and
//! month boundaries, weekday, season and moon phase. They never fail; degenerate
//! definitions (no days in the year, no weekdays, zero-length moon cycles)
//! produce neutral results instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::definition::{CalendarDefinition, MoonDefinition, SeasonDefinition};
use super::model::{Calendar, CalendarEvent, MAX_EVENT_SPAN};

// ============================================================================
// DateParts
// ============================================================================

/// A resolved date; every component is 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateParts {
    pub year: u64,
    pub month_index: usize,
    pub day_of_month: u32,
}

impl DateParts {
    pub fn new(year: u64, month_index: usize, day_of_month: u32) -> Self {
        Self {
            year,
            month_index,
            day_of_month,
        }
    }
}

/// Sum of all month lengths.
pub fn total_days_in_year(def: &CalendarDefinition) -> u64 {
    def.months.iter().map(|m| m.days as u64).sum()
}

/// Days from the start of a year to the start of `month_index`.
/// Indices past the end count every month.
fn month_offset(month_index: usize, def: &CalendarDefinition) -> u64 {
    def.months
        .iter()
        .take(month_index)
        .map(|m| m.days as u64)
        .sum()
}

/// Converts an absolute day index to year, month and day of month.
pub fn day_index_to_date(day: u64, def: &CalendarDefinition) -> DateParts {
    let days_in_year = total_days_in_year(def);
    if days_in_year == 0 {
        return DateParts::new(0, 0, 0);
    }

    let year = day / days_in_year;
    let mut remaining = day % days_in_year;

    for (month_index, month) in def.months.iter().enumerate() {
        let days = month.days as u64;
        if remaining < days {
            return DateParts::new(year, month_index, remaining as u32);
        }
        remaining -= days;
    }

    // Unreachable while remaining < days_in_year
    DateParts::new(year, 0, 0)
}

/// Converts date parts back to an absolute day index. Saturates at `u64::MAX`.
pub fn date_to_day_index(parts: DateParts, def: &CalendarDefinition) -> u64 {
    get_month_start_day_index(parts.year, parts.month_index, def)
        .saturating_add(u64::from(parts.day_of_month))
}

/// Absolute day index of the first day of `month_index` in `year`.
/// Saturates at `u64::MAX`.
pub fn get_month_start_day_index(year: u64, month_index: usize, def: &CalendarDefinition) -> u64 {
    year.saturating_mul(total_days_in_year(def))
        .saturating_add(month_offset(month_index, def))
}

/// Length of a month, or 0 when `month_index` is out of range.
pub fn get_days_in_month(month_index: i64, def: &CalendarDefinition) -> u32 {
    usize::try_from(month_index)
        .ok()
        .and_then(|i| def.months.get(i))
        .map_or(0, |m| m.days)
}

/// Name of the weekday for `day`; empty when the calendar has no week.
pub fn get_weekday_name(day: u64, def: &CalendarDefinition) -> &str {
    if def.weekdays.is_empty() {
        return "";
    }
    let index = (day % def.weekdays.len() as u64) as usize;
    &def.weekdays[index]
}

/// Moves the clock by `delta` days without going below day 0.
pub fn advance_day(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

// ============================================================================
// Seasons
// ============================================================================

/// The season in effect on `day`.
///
/// Picks the season with the latest start at or before the day of year. When
/// no season has started yet this year, the season that started last in the
/// previous year still applies. Two seasons starting on the same day resolve
/// to the one defined first.
pub fn get_season(day: u64, def: &CalendarDefinition) -> Option<&SeasonDefinition> {
    if def.seasons.is_empty() {
        return None;
    }
    let days_in_year = total_days_in_year(def);
    let day_of_year = if days_in_year == 0 {
        0
    } else {
        day % days_in_year
    };

    let mut current: Option<(u64, &SeasonDefinition)> = None;
    let mut latest: Option<(u64, &SeasonDefinition)> = None;

    for season in &def.seasons {
        let start = month_offset(season.start_month, def) + season.start_day as u64;

        if start <= day_of_year && current.map_or(true, |(best, _)| start > best) {
            current = Some((start, season));
        }
        if latest.map_or(true, |(best, _)| start > best) {
            latest = Some((start, season));
        }
    }

    current.or(latest).map(|(_, season)| season)
}

// ============================================================================
// Moons
// ============================================================================

/// Named phase of a moon, one per eighth of its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Returns all phases in cycle order.
    pub fn all() -> [MoonPhase; 8] {
        [
            MoonPhase::NewMoon,
            MoonPhase::WaxingCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::FullMoon,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::WaningCrescent,
        ]
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fraction of the way through the moon's cycle on `day`, in `[0, 1)`.
pub fn get_moon_phase(day: u64, moon: &MoonDefinition) -> f64 {
    if moon.cycle_days == 0 {
        return 0.0;
    }
    let cycle = moon.cycle_days as i128;
    let position = (day as i128 + moon.offset as i128).rem_euclid(cycle);
    position as f64 / cycle as f64
}

/// Buckets a phase fraction into one of eight named phases.
///
/// Fractions outside `[0, 1)` wrap first, so `1.0` is a new moon again and
/// `-0.25` is the last quarter.
pub fn get_moon_phase_name(fraction: f64) -> MoonPhase {
    if !fraction.is_finite() {
        return MoonPhase::NewMoon;
    }
    let wrapped = fraction.rem_euclid(1.0);
    let octant = ((wrapped * 8.0).floor() as usize).min(7);
    MoonPhase::all()[octant]
}

// ============================================================================
// Event grouping
// ============================================================================

/// Buckets events under every absolute day they cover.
///
/// Multi-day events are clamped to `MAX_EVENT_SPAN` days past their start, and
/// an end before the start counts as a single-day event. Within a bucket events
/// keep their input order.
pub fn group_events_by_day(events: &[CalendarEvent]) -> BTreeMap<u64, Vec<&CalendarEvent>> {
    let mut by_day: BTreeMap<u64, Vec<&CalendarEvent>> = BTreeMap::new();

    for event in events {
        let start = event.absolute_day;
        let end = match event.end_day {
            Some(end) if end > start => end.min(start.saturating_add(MAX_EVENT_SPAN)),
            _ => start,
        };
        for day in start..=end {
            by_day.entry(day).or_default().push(event);
        }
    }

    by_day
}

/// Events covering a single day, in input order.
pub fn events_on_day(events: &[CalendarEvent], day: u64) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            let end = match event.end_day {
                Some(end) if end > event.absolute_day => {
                    end.min(event.absolute_day.saturating_add(MAX_EVENT_SPAN))
                }
                _ => event.absolute_day,
            };
            (event.absolute_day..=end).contains(&day)
        })
        .collect()
}

// ============================================================================
// DayDescription
// ============================================================================

/// A moon's phase on a particular day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonReading {
    pub name: String,
    pub fraction: f64,
    pub phase: MoonPhase,
}

/// Everything a calendar view shows about one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDescription {
    pub absolute_day: u64,
    pub date: DateParts,
    pub month_name: String,
    pub weekday: String,
    pub season: Option<String>,
    pub moons: Vec<MoonReading>,
    pub epoch_label: String,
    pub era_name: String,
}

impl DayDescription {
    /// Display the full date (e.g., "15th of Mirtul, Year 3 DR").
    ///
    /// Day and year are shown 1-indexed.
    pub fn display_full(&self) -> String {
        let day = self.date.day_of_month + 1;
        let year = self.date.year + 1;
        let label = if self.epoch_label.is_empty() {
            "Year"
        } else {
            self.epoch_label.as_str()
        };

        let mut out = format!(
            "{}{} of {}, {} {}",
            day,
            ordinal_suffix(day),
            self.month_name,
            label,
            year
        );
        if !self.era_name.is_empty() {
            out.push(' ');
            out.push_str(&self.era_name);
        }
        out
    }
}

/// Resolves `day` against a calendar's definition and labels.
pub fn describe_day(day: u64, calendar: &Calendar) -> DayDescription {
    let def = &calendar.definition;
    let date = day_index_to_date(day, def);
    let month_name = def
        .months
        .get(date.month_index)
        .map(|m| m.name.clone())
        .unwrap_or_default();

    DayDescription {
        absolute_day: day,
        date,
        month_name,
        weekday: get_weekday_name(day, def).to_string(),
        season: get_season(day, def).map(|s| s.name.clone()),
        moons: def
            .moons
            .iter()
            .map(|moon| {
                let fraction = get_moon_phase(day, moon);
                MoonReading {
                    name: moon.name.clone(),
                    fraction,
                    phase: get_moon_phase_name(fraction),
                }
            })
            .collect(),
        epoch_label: calendar.epoch_label.clone(),
        era_name: calendar.era_name.clone(),
    }
}

/// Returns the ordinal suffix for a day number (st, nd, rd, th).
fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::definition::MonthDefinition;
    use crate::calendar::model::CalendarPreset;
    use crate::ids::{CalendarId, EventId};

    /// Months of 3, 1 and 4 days; 8-day year, 3-day week.
    fn uneven() -> CalendarDefinition {
        CalendarDefinition::new(
            vec![
                MonthDefinition::new("Ash", 3),
                MonthDefinition::new("Blink", 1),
                MonthDefinition::new("Cinder", 4),
            ],
            vec!["Dawnday".into(), "Midday".into(), "Duskday".into()],
            vec![MoonDefinition::new("Pale", 8, 0)],
            vec![
                SeasonDefinition::new("Bloom", 0, 1),
                SeasonDefinition::new("Ember", 2, 2),
            ],
        )
    }

    fn event(id: &str, start: u64, end: Option<u64>) -> CalendarEvent {
        let e = CalendarEvent::new(EventId::new(id), start, id);
        match end {
            Some(end) => e.with_end_day(end),
            None => e,
        }
    }

    mod day_index {
        use super::*;

        #[test]
        fn day_zero_is_first_day() {
            assert_eq!(day_index_to_date(0, &uneven()), DateParts::new(0, 0, 0));
        }

        #[test]
        fn month_boundaries() {
            let def = uneven();
            assert_eq!(day_index_to_date(2, &def), DateParts::new(0, 0, 2));
            assert_eq!(day_index_to_date(3, &def), DateParts::new(0, 1, 0));
            assert_eq!(day_index_to_date(4, &def), DateParts::new(0, 2, 0));
            assert_eq!(day_index_to_date(7, &def), DateParts::new(0, 2, 3));
        }

        #[test]
        fn year_rollover() {
            let def = uneven();
            assert_eq!(day_index_to_date(8, &def), DateParts::new(1, 0, 0));
            assert_eq!(day_index_to_date(8 * 5 + 3, &def), DateParts::new(5, 1, 0));
        }

        #[test]
        fn round_trip_over_several_years() {
            let def = uneven();
            for day in 0..(total_days_in_year(&def) * 4) {
                let parts = day_index_to_date(day, &def);
                assert_eq!(date_to_day_index(parts, &def), day, "day {}", day);
            }
        }

        #[test]
        fn zero_length_year_maps_to_origin() {
            let def = CalendarDefinition::new(
                vec![MonthDefinition::new("Void", 0)],
                vec![],
                vec![],
                vec![],
            );
            assert_eq!(total_days_in_year(&def), 0);
            assert_eq!(day_index_to_date(0, &def), DateParts::new(0, 0, 0));
            assert_eq!(day_index_to_date(12345, &def), DateParts::new(0, 0, 0));
        }

        #[test]
        fn month_start_indices() {
            let def = uneven();
            assert_eq!(get_month_start_day_index(0, 0, &def), 0);
            assert_eq!(get_month_start_day_index(0, 2, &def), 4);
            assert_eq!(get_month_start_day_index(2, 1, &def), 19);
        }

        #[test]
        fn huge_years_saturate() {
            let def = uneven();
            assert_eq!(get_month_start_day_index(u64::MAX, 1, &def), u64::MAX);
            assert_eq!(
                date_to_day_index(DateParts::new(u64::MAX / 2, 0, 5), &def),
                u64::MAX
            );
        }

        #[test]
        fn days_in_month_out_of_range_is_zero() {
            let def = uneven();
            assert_eq!(get_days_in_month(0, &def), 3);
            assert_eq!(get_days_in_month(2, &def), 4);
            assert_eq!(get_days_in_month(3, &def), 0);
            assert_eq!(get_days_in_month(-1, &def), 0);
        }

        #[test]
        fn advance_never_goes_negative() {
            assert_eq!(advance_day(10, 5), 15);
            assert_eq!(advance_day(10, -4), 6);
            assert_eq!(advance_day(10, -40), 0);
            assert_eq!(advance_day(0, i64::MIN), 0);
            assert_eq!(advance_day(u64::MAX, 1), u64::MAX);
        }
    }

    mod weekday {
        use super::*;

        #[test]
        fn cycles_through_names() {
            let def = uneven();
            assert_eq!(get_weekday_name(0, &def), "Dawnday");
            assert_eq!(get_weekday_name(1, &def), "Midday");
            assert_eq!(get_weekday_name(5, &def), "Duskday");
            assert_eq!(get_weekday_name(6, &def), "Dawnday");
        }

        #[test]
        fn empty_without_weekdays() {
            let mut def = uneven();
            def.weekdays.clear();
            assert_eq!(get_weekday_name(4, &def), "");
        }
    }

    mod season {
        use super::*;

        fn name(day: u64, def: &CalendarDefinition) -> Option<&str> {
            get_season(day, def).map(|s| s.name.as_str())
        }

        #[test]
        fn picks_latest_started_season() {
            let def = uneven();
            // Bloom starts day 1, Ember starts day 4 + 2 = 6
            assert_eq!(name(1, &def), Some("Bloom"));
            assert_eq!(name(5, &def), Some("Bloom"));
            assert_eq!(name(6, &def), Some("Ember"));
            assert_eq!(name(7, &def), Some("Ember"));
        }

        #[test]
        fn wraps_from_previous_year() {
            let def = uneven();
            assert_eq!(name(0, &def), Some("Ember"));
            assert_eq!(name(8, &def), Some("Ember"));
            assert_eq!(name(9, &def), Some("Bloom"));
        }

        #[test]
        fn none_without_seasons() {
            let mut def = uneven();
            def.seasons.clear();
            assert_eq!(name(3, &def), None);
        }

        #[test]
        fn tie_resolves_to_first_defined() {
            let mut def = uneven();
            def.seasons = vec![
                SeasonDefinition::new("Early", 1, 0),
                SeasonDefinition::new("Twin", 1, 0),
            ];
            assert_eq!(name(3, &def), Some("Early"));
            // Wrap case uses the same rule
            assert_eq!(name(0, &def), Some("Early"));
        }

        #[test]
        fn definition_order_does_not_matter() {
            let mut def = uneven();
            def.seasons.reverse();
            assert_eq!(name(2, &def), Some("Bloom"));
            assert_eq!(name(0, &def), Some("Ember"));
        }
    }

    mod moon {
        use super::*;

        #[test]
        fn phase_fraction() {
            let moon = MoonDefinition::new("Pale", 8, 0);
            assert_eq!(get_moon_phase(0, &moon), 0.0);
            assert_eq!(get_moon_phase(2, &moon), 0.25);
            assert_eq!(get_moon_phase(4, &moon), 0.5);
            assert_eq!(get_moon_phase(8, &moon), 0.0);
        }

        #[test]
        fn offset_shifts_phase() {
            let moon = MoonDefinition::new("Red", 8, 4);
            assert_eq!(get_moon_phase(0, &moon), 0.5);
            let back = MoonDefinition::new("Red", 8, -2);
            assert_eq!(get_moon_phase(0, &back), 0.75);
        }

        #[test]
        fn phase_is_periodic() {
            let moon = MoonDefinition::new("Odd", 29, 7);
            for day in 0..200 {
                assert_eq!(get_moon_phase(day, &moon), get_moon_phase(day + 29, &moon));
            }
        }

        #[test]
        fn zero_cycle_is_new() {
            let moon = MoonDefinition::new("Broken", 0, 3);
            assert_eq!(get_moon_phase(17, &moon), 0.0);
        }

        #[test]
        fn phase_names() {
            assert_eq!(get_moon_phase_name(0.0), MoonPhase::NewMoon);
            assert_eq!(get_moon_phase_name(0.1), MoonPhase::NewMoon);
            assert_eq!(get_moon_phase_name(0.125), MoonPhase::WaxingCrescent);
            assert_eq!(get_moon_phase_name(0.25), MoonPhase::FirstQuarter);
            assert_eq!(get_moon_phase_name(0.4), MoonPhase::WaxingGibbous);
            assert_eq!(get_moon_phase_name(0.5), MoonPhase::FullMoon);
            assert_eq!(get_moon_phase_name(0.7), MoonPhase::WaningGibbous);
            assert_eq!(get_moon_phase_name(0.75), MoonPhase::LastQuarter);
            assert_eq!(get_moon_phase_name(0.9), MoonPhase::WaningCrescent);
        }

        #[test]
        fn phase_names_wrap() {
            assert_eq!(get_moon_phase_name(1.0), MoonPhase::NewMoon);
            assert_eq!(get_moon_phase_name(1.5), MoonPhase::FullMoon);
            assert_eq!(get_moon_phase_name(-0.25), MoonPhase::LastQuarter);
            assert_eq!(get_moon_phase_name(-0.5), MoonPhase::FullMoon);
            assert_eq!(get_moon_phase_name(f64::NAN), MoonPhase::NewMoon);
        }

        #[test]
        fn display_names() {
            assert_eq!(MoonPhase::FirstQuarter.to_string(), "First Quarter");
            assert_eq!(MoonPhase::FullMoon.display_name(), "Full Moon");
        }
    }

    mod grouping {
        use super::*;

        #[test]
        fn single_day_event_appears_once() {
            let events = vec![event("a", 3, None), event("b", 4, Some(4))];
            let grouped = group_events_by_day(&events);
            assert_eq!(grouped.len(), 2);
            assert_eq!(grouped[&3][0].id.as_str(), "a");
            assert_eq!(grouped[&4][0].id.as_str(), "b");
        }

        #[test]
        fn multi_day_event_fills_its_span() {
            let events = vec![event("fair", 5, Some(8))];
            let grouped = group_events_by_day(&events);
            let days: Vec<u64> = grouped.keys().copied().collect();
            assert_eq!(days, vec![5, 6, 7, 8]);
            assert!(!grouped.contains_key(&4));
            assert!(!grouped.contains_key(&9));
        }

        #[test]
        fn oversized_span_is_clamped() {
            let events = vec![event("war", 0, Some(100))];
            let grouped = group_events_by_day(&events);
            assert_eq!(grouped.keys().next_back(), Some(&60));
            assert_eq!(grouped.len(), 61);
        }

        #[test]
        fn backwards_span_is_single_day() {
            let events = vec![event("odd", 10, Some(2))];
            let grouped = group_events_by_day(&events);
            assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![10]);
        }

        #[test]
        fn buckets_keep_input_order() {
            let events = vec![
                event("z", 2, None),
                event("a", 1, Some(3)),
                event("m", 2, None),
            ];
            let grouped = group_events_by_day(&events);
            let ids: Vec<&str> = grouped[&2].iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["z", "a", "m"]);
        }

        #[test]
        fn events_on_day_matches_grouping() {
            let events = vec![event("a", 1, Some(3)), event("b", 3, None), event("c", 0, Some(90))];
            let grouped = group_events_by_day(&events);
            for day in 0..70 {
                let direct: Vec<&str> = events_on_day(&events, day)
                    .iter()
                    .map(|e| e.id.as_str())
                    .collect();
                let bucket: Vec<&str> = grouped
                    .get(&day)
                    .map(|b| b.iter().map(|e| e.id.as_str()).collect())
                    .unwrap_or_default();
                assert_eq!(direct, bucket, "day {}", day);
            }
        }
    }

    mod description {
        use super::*;

        fn calendar() -> Calendar {
            Calendar::new(CalendarId::new("c"), "Test", CalendarPreset::Custom, uneven())
                .with_era("Year", "AR")
        }

        #[test]
        fn describes_day() {
            let d = describe_day(13, &calendar());
            assert_eq!(d.date, DateParts::new(1, 2, 1));
            assert_eq!(d.month_name, "Cinder");
            assert_eq!(d.weekday, "Midday");
            assert_eq!(d.season.as_deref(), Some("Bloom"));
            assert_eq!(d.moons.len(), 1);
            assert_eq!(d.moons[0].phase, MoonPhase::WaningGibbous);
        }

        #[test]
        fn display_full_is_one_indexed() {
            assert_eq!(describe_day(0, &calendar()).display_full(), "1st of Ash, Year 1 AR");
            assert_eq!(describe_day(13, &calendar()).display_full(), "2nd of Cinder, Year 2 AR");
        }

        #[test]
        fn display_full_without_labels() {
            let cal = Calendar::new(CalendarId::new("c"), "Test", CalendarPreset::Custom, uneven());
            assert_eq!(describe_day(2, &cal).display_full(), "3rd of Ash, Year 1");
        }

        #[test]
        fn ordinal_suffixes() {
            assert_eq!(ordinal_suffix(1), "st");
            assert_eq!(ordinal_suffix(2), "nd");
            assert_eq!(ordinal_suffix(3), "rd");
            assert_eq!(ordinal_suffix(4), "th");
            assert_eq!(ordinal_suffix(11), "th");
            assert_eq!(ordinal_suffix(12), "th");
            assert_eq!(ordinal_suffix(13), "th");
            assert_eq!(ordinal_suffix(21), "st");
            assert_eq!(ordinal_suffix(32), "nd");
            assert_eq!(ordinal_suffix(111), "th");
        }
    }
}
