use std::path::PathBuf;

use clap::{Parser, Subcommand};

use heartkeep_domain::CalendarPreset;

/// Heartkeep campaign calendar keeper.
#[derive(Debug, Parser)]
#[command(name = "heartkeep", version, about = "Campaign calendar keeper")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Campaign to operate on (overrides HEARTKEEP_CAMPAIGN).
    #[arg(short, long, global = true)]
    pub campaign: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show today on the active calendar.
    Show,
    /// List all calendars in the campaign.
    List,
    /// Move the active calendar forward (or back, with a negative count).
    Advance {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Add a calendar from a preset (daggerheart, gregorian, harptos, custom).
    Add { preset: CalendarPreset },
    /// Make another calendar active.
    Switch { id: String },
    /// Delete a calendar.
    Delete { id: String },
    /// Record an event on the active calendar.
    Event(EventArgs),
    /// Write the active calendar to a file.
    Export {
        path: PathBuf,
        /// Include events.
        #[arg(long)]
        full: bool,
    },
    /// Add a calendar from an export file.
    Import {
        path: PathBuf,
        /// Keep the file's events.
        #[arg(long)]
        full: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct EventArgs {
    /// Absolute day the event starts on.
    pub day: u64,

    pub title: String,

    /// Last day of a multi-day event.
    #[arg(long)]
    pub end: Option<u64>,

    /// Built-in category name or custom category id.
    #[arg(long, default_value = "other")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,
}
