//! Built-in calendars
//!
//! - `DaggerheartDefault` - 12 months of 28 days, two moons
//! - `GregorianLike` - the familiar 365-day year without leap days
//! - `Harptos` - 12 months of 30 days plus five one-day festivals (365 days)

use super::definition::{CalendarDefinition, MonthDefinition, MoonDefinition, SeasonDefinition};
use super::model::{Calendar, CalendarPreset};
use super::multi::MultiCalendarEnvelope;
use crate::ids::{CalendarId, IdGenerator};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Months, weekdays, moons and seasons for a preset.
///
/// `Custom` yields a plain twelve-month, thirty-day skeleton for users to edit.
pub fn preset_definition(preset: CalendarPreset) -> CalendarDefinition {
    match preset {
        CalendarPreset::DaggerheartDefault => daggerheart_definition(),
        CalendarPreset::GregorianLike => gregorian_definition(),
        CalendarPreset::Harptos => harptos_definition(),
        CalendarPreset::Custom => CalendarDefinition::new(
            (1..=12)
                .map(|i| MonthDefinition::new(format!("Month {}", i), 30))
                .collect(),
            vec![],
            vec![],
            vec![],
        ),
    }
}

/// A fresh calendar at day 0 built from a preset.
pub fn calendar_from_preset(preset: CalendarPreset, ids: &dyn IdGenerator) -> Calendar {
    let (epoch_label, era_name) = match preset {
        CalendarPreset::DaggerheartDefault => ("Year", "AS"),
        CalendarPreset::GregorianLike => ("Year", "AD"),
        CalendarPreset::Harptos => ("Year", "DR"),
        CalendarPreset::Custom => ("Year", ""),
    };

    Calendar::new(
        CalendarId::new(ids.generate_id()),
        preset.display_name(),
        preset,
        preset_definition(preset),
    )
    .with_era(epoch_label, era_name)
}

/// Default campaign calendar for a new character or campaign.
pub fn create_daggerheart_default(ids: &dyn IdGenerator) -> MultiCalendarEnvelope {
    MultiCalendarEnvelope::single(calendar_from_preset(CalendarPreset::DaggerheartDefault, ids))
}

pub fn create_gregorian_like(ids: &dyn IdGenerator) -> MultiCalendarEnvelope {
    MultiCalendarEnvelope::single(calendar_from_preset(CalendarPreset::GregorianLike, ids))
}

pub fn create_harptos(ids: &dyn IdGenerator) -> MultiCalendarEnvelope {
    MultiCalendarEnvelope::single(calendar_from_preset(CalendarPreset::Harptos, ids))
}

fn daggerheart_definition() -> CalendarDefinition {
    let months = [
        "Deepfrost",
        "Thawing",
        "Seedtide",
        "Bloomrise",
        "Brightsun",
        "Highsummer",
        "Goldfire",
        "Harvestmoon",
        "Emberfall",
        "Mistwane",
        "Frostcall",
        "Longnight",
    ];

    CalendarDefinition::new(
        months.iter().map(|name| MonthDefinition::new(*name, 28)).collect(),
        names(&[
            "Sunsday", "Moonsday", "Tidesday", "Windsday", "Flamesday", "Starsday", "Restday",
        ]),
        vec![
            MoonDefinition::new("Sollus", 28, 0),
            MoonDefinition::new("Veyra", 45, 10),
        ],
        vec![
            SeasonDefinition::new("Spring", 2, 0),
            SeasonDefinition::new("Summer", 5, 0),
            SeasonDefinition::new("Autumn", 8, 0),
            SeasonDefinition::new("Winter", 11, 0),
        ],
    )
}

fn gregorian_definition() -> CalendarDefinition {
    CalendarDefinition::new(
        vec![
            MonthDefinition::new("January", 31),
            MonthDefinition::new("February", 28),
            MonthDefinition::new("March", 31),
            MonthDefinition::new("April", 30),
            MonthDefinition::new("May", 31),
            MonthDefinition::new("June", 30),
            MonthDefinition::new("July", 31),
            MonthDefinition::new("August", 31),
            MonthDefinition::new("September", 30),
            MonthDefinition::new("October", 31),
            MonthDefinition::new("November", 30),
            MonthDefinition::new("December", 31),
        ],
        names(&[
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ]),
        vec![MoonDefinition::new("Moon", 30, 0)],
        vec![
            SeasonDefinition::new("Spring", 2, 19),
            SeasonDefinition::new("Summer", 5, 20),
            SeasonDefinition::new("Autumn", 8, 21),
            SeasonDefinition::new("Winter", 11, 20),
        ],
    )
}

fn harptos_definition() -> CalendarDefinition {
    CalendarDefinition::new(
        vec![
            MonthDefinition::new("Hammer", 30),
            MonthDefinition::new("Midwinter", 1),
            MonthDefinition::new("Alturiak", 30),
            MonthDefinition::new("Ches", 30),
            MonthDefinition::new("Tarsakh", 30),
            MonthDefinition::new("Greengrass", 1),
            MonthDefinition::new("Mirtul", 30),
            MonthDefinition::new("Kythorn", 30),
            MonthDefinition::new("Flamerule", 30),
            MonthDefinition::new("Midsummer", 1),
            MonthDefinition::new("Eleasis", 30),
            MonthDefinition::new("Eleint", 30),
            MonthDefinition::new("Highharvestide", 1),
            MonthDefinition::new("Marpenoth", 30),
            MonthDefinition::new("Uktar", 30),
            MonthDefinition::new("Feast of the Moon", 1),
            MonthDefinition::new("Nightal", 30),
        ],
        // Tenday
        names(&[
            "First-day",
            "Second-day",
            "Third-day",
            "Fourth-day",
            "Fifth-day",
            "Sixth-day",
            "Seventh-day",
            "Eighth-day",
            "Ninth-day",
            "Tenth-day",
        ]),
        vec![MoonDefinition::new("Selune", 30, 0)],
        vec![
            SeasonDefinition::new("Spring", 3, 18),
            SeasonDefinition::new("Summer", 7, 19),
            SeasonDefinition::new("Autumn", 11, 20),
            SeasonDefinition::new("Winter", 16, 19),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::engine::{day_index_to_date, get_season, total_days_in_year};
    use crate::calendar::multi::{get_active_calendar, CALENDAR_SCHEMA_VERSION};
    use crate::ids::SequentialIdGenerator;

    fn all_factories() -> Vec<(CalendarPreset, MultiCalendarEnvelope)> {
        let ids = SequentialIdGenerator::new("cal");
        vec![
            (CalendarPreset::DaggerheartDefault, create_daggerheart_default(&ids)),
            (CalendarPreset::GregorianLike, create_gregorian_like(&ids)),
            (CalendarPreset::Harptos, create_harptos(&ids)),
        ]
    }

    #[test]
    fn every_preset_envelope_validates() {
        for (preset, env) in all_factories() {
            assert!(env.validate().is_ok(), "{} failed validation", preset);
            assert_eq!(env.version, CALENDAR_SCHEMA_VERSION);
            assert_eq!(env.calendars.len(), 1);
            assert_eq!(env.calendars[0].preset, preset);
            assert_eq!(get_active_calendar(&env).map(|c| &c.id), Some(&env.calendars[0].id));
        }
    }

    #[test]
    fn factories_mint_fresh_ids() {
        let envs = all_factories();
        assert_eq!(envs[0].1.calendars[0].id.as_str(), "cal-1");
        assert_eq!(envs[1].1.calendars[0].id.as_str(), "cal-2");
        assert_eq!(envs[2].1.calendars[0].id.as_str(), "cal-3");
    }

    #[test]
    fn custom_definition_validates() {
        assert!(preset_definition(CalendarPreset::Custom).validate().is_ok());
    }

    #[test]
    fn daggerheart_year_length() {
        let def = preset_definition(CalendarPreset::DaggerheartDefault);
        assert_eq!(total_days_in_year(&def), 336);
        assert_eq!(def.moons.len(), 2);
    }

    #[test]
    fn gregorian_has_365_days() {
        let def = preset_definition(CalendarPreset::GregorianLike);
        assert_eq!(total_days_in_year(&def), 365);
        assert_eq!(def.weekdays.len(), 7);
    }

    #[test]
    fn gregorian_seasons() {
        let def = preset_definition(CalendarPreset::GregorianLike);
        // January 1 is still winter from the previous year
        assert_eq!(get_season(0, &def).map(|s| s.name.as_str()), Some("Winter"));
        // March 20 (day 31 + 28 + 19)
        assert_eq!(get_season(78, &def).map(|s| s.name.as_str()), Some("Spring"));
        assert_eq!(get_season(77, &def).map(|s| s.name.as_str()), Some("Winter"));
    }

    #[test]
    fn harptos_has_365_days() {
        let def = preset_definition(CalendarPreset::Harptos);
        assert_eq!(total_days_in_year(&def), 365);
        assert_eq!(def.months.len(), 17);
        assert_eq!(def.months.iter().filter(|m| m.days == 1).count(), 5);
        assert_eq!(def.weekdays.len(), 10);
    }

    #[test]
    fn harptos_midwinter_follows_hammer() {
        let def = preset_definition(CalendarPreset::Harptos);
        let midwinter = day_index_to_date(30, &def);
        assert_eq!(def.months[midwinter.month_index].name, "Midwinter");
        let alturiak = day_index_to_date(31, &def);
        assert_eq!(def.months[alturiak.month_index].name, "Alturiak");
        assert_eq!(alturiak.day_of_month, 0);
    }

    #[test]
    fn harptos_era_is_dr() {
        let ids = SequentialIdGenerator::new("cal");
        let env = create_harptos(&ids);
        assert_eq!(env.calendars[0].era_name, "DR");
        assert_eq!(env.calendars[0].name, "Calendar of Harptos");
    }
}
