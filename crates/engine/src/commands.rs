//! Executes CLI commands against the calendar service.

use std::fs;
use std::io::Write;

use anyhow::Context;

use heartkeep_domain::{
    describe_day, events_on_day, get_active_calendar, Calendar, CalendarId, EventCategory,
};

use crate::cli::{Command, EventArgs};
use crate::use_cases::calendar::{CalendarService, NewEvent};

pub fn run(
    command: Command,
    service: &CalendarService,
    campaign: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            let envelope = service.load(campaign)?;
            let calendar = get_active_calendar(&envelope)
                .context("Active calendar id does not match any calendar")?;
            write_today(calendar, out)?;
        }
        Command::List => {
            let envelope = service.load(campaign)?;
            for calendar in &envelope.calendars {
                let marker = if calendar.id == envelope.active_calendar_id {
                    '*'
                } else {
                    ' '
                };
                writeln!(
                    out,
                    "{} {}  {} ({}, day {})",
                    marker, calendar.id, calendar.name, calendar.preset, calendar.current_day
                )?;
            }
        }
        Command::Advance { days } => {
            let calendar = service.advance_day(campaign, days)?;
            write_today(&calendar, out)?;
        }
        Command::Add { preset } => {
            let calendar = service.add_preset_calendar(campaign, preset)?;
            writeln!(out, "Added {} ({})", calendar.name, calendar.id)?;
        }
        Command::Switch { id } => {
            let calendar = service.switch_calendar(campaign, &CalendarId::new(id))?;
            writeln!(out, "Active calendar: {} ({})", calendar.name, calendar.id)?;
        }
        Command::Delete { id } => {
            let id = CalendarId::new(id);
            let envelope = service.delete_calendar(campaign, &id)?;
            writeln!(
                out,
                "{} calendar(s) remain, active: {}",
                envelope.calendars.len(),
                envelope.active_calendar_id
            )?;
        }
        Command::Event(args) => {
            let event = service.add_event(campaign, new_event(args))?;
            writeln!(out, "Added event {} on day {}", event.id, event.absolute_day)?;
        }
        Command::Export { path, full } => {
            let text = service.export_active(campaign, full)?;
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        Command::Import { path, full } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let calendar = service.import_calendar(campaign, &text, full)?;
            writeln!(out, "Imported {} ({})", calendar.name, calendar.id)?;
        }
    }
    Ok(())
}

fn new_event(args: EventArgs) -> NewEvent {
    NewEvent {
        absolute_day: args.day,
        end_day: args.end,
        title: args.title,
        description: args.description,
        category: EventCategory::from(args.category),
    }
}

fn write_today(calendar: &Calendar, out: &mut impl Write) -> std::io::Result<()> {
    let today = describe_day(calendar.current_day, calendar);
    writeln!(out, "{}: {}", calendar.name, today.display_full())?;
    writeln!(out, "  Day {}, {}", today.absolute_day, today.weekday)?;
    if let Some(season) = &today.season {
        writeln!(out, "  Season: {}", season)?;
    }
    for moon in &today.moons {
        writeln!(out, "  {}: {}", moon.name, moon.phase.display_name())?;
    }
    for event in events_on_day(&calendar.events, calendar.current_day) {
        writeln!(out, "  [{}] {}", event.category.as_str(), event.title)?;
    }
    Ok(())
}
