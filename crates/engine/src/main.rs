//! Heartkeep - Main entry point.

use std::sync::Arc;

use clap::Parser;

use heartkeep_domain::UuidIdGenerator;
use heartkeep_engine::cli::Cli;
use heartkeep_engine::commands;
use heartkeep_engine::infrastructure::FileStorage;
use heartkeep_engine::{logging, CalendarService, EngineConfig};

fn main() -> anyhow::Result<()> {
    // Local overrides first; dotenvy never replaces a variable already set.
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = EngineConfig::from_env().with_campaign(cli.campaign.clone());
    tracing::info!(
        data_dir = %config.data_dir.display(),
        campaign = %config.campaign,
        "Starting Heartkeep"
    );

    let service = CalendarService::new(
        Arc::new(FileStorage::new(config.data_dir.clone())),
        Arc::new(UuidIdGenerator::new()),
    );

    let stdout = std::io::stdout();
    commands::run(cli.command, &service, &config.campaign, &mut stdout.lock())
}
